//! Static file server for the project root.

use crate::domain::model::{Example, ExampleEntry, ServeOutcome, ServerConfig};
use crate::utils::error::{LaunchError, Result};
use axum::{
    handler::HandlerWithoutStateExt,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Characters escaped when a file name is placed in a listing link.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// A bound listener waiting to serve the project root.
pub struct DevServer {
    listener: TcpListener,
    root: PathBuf,
    port: u16,
}

impl DevServer {
    /// Binds `0.0.0.0:{port}`.
    ///
    /// A port held by another process is reported as [`LaunchError::PortInUse`]
    /// so the caller can suggest another one.
    pub async fn bind(config: &ServerConfig) -> Result<Self> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

        let listener = TcpListener::bind(addr).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::AddrInUse => LaunchError::PortInUse { port: config.port },
            _ => LaunchError::BindError {
                port: config.port,
                source: e,
            },
        })?;

        let port = listener.local_addr().map_err(LaunchError::ServerError)?.port();
        info!("Listening on port {} serving {}", port, config.root.display());

        Ok(Self {
            listener,
            root: config.root.clone(),
            port,
        })
    }

    /// Port actually bound (differs from the requested one when it was 0).
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn page_url(&self, entry: &ExampleEntry) -> String {
        page_url(self.port, entry)
    }

    /// Serves until `shutdown` resolves.
    ///
    /// The accept loop is dropped as soon as the signal fires; in-flight
    /// responses are not awaited.
    pub async fn run_until<F>(self, shutdown: F) -> Result<ServeOutcome>
    where
        F: Future<Output = ()> + Send,
    {
        let app = router(&self.root);
        let server = axum::serve(self.listener, app).into_future();

        tokio::select! {
            result = server => {
                result.map_err(LaunchError::ServerError)?;
                Err(LaunchError::ServerError(std::io::Error::other(
                    "server stopped accepting connections",
                )))
            }
            _ = shutdown => {
                info!("Shutdown requested, closing listener on port {}", self.port);
                Ok(ServeOutcome::Interrupted)
            }
        }
    }
}

/// Files under `root` with MIME inference; directories without an
/// `index.html` get a generated listing.
pub fn router(root: &Path) -> Router {
    let listing_root = root.to_path_buf();
    let listing = move |uri: Uri| {
        let root = listing_root.clone();
        async move { directory_listing(&root, &uri).await }
    };

    let files = ServeDir::new(root)
        .append_index_html_on_directories(true)
        .fallback(listing.into_service());

    Router::new()
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

pub fn page_url(port: u16, entry: &ExampleEntry) -> String {
    format!("http://localhost:{}/{}", port, entry.relative_path())
}

/// 啟動後輸出給操作者的狀態訊息
pub fn render_banner(port: u16, entry: &ExampleEntry) -> String {
    let mut lines = vec![
        "╔══════════════════════════════════════════════════════════════════╗".to_string(),
        "║              Open DataViz - Local Test Server                    ║".to_string(),
        "╚══════════════════════════════════════════════════════════════════╝".to_string(),
        String::new(),
        format!("🚀 Server started on port {}", port),
        format!("📊 Opening: {}", entry.display_name),
        format!("🌐 URL: {}", page_url(port, entry)),
        String::new(),
        "Available pages:".to_string(),
    ];

    for example in Example::ALL {
        lines.push(format!(
            "  • {:<18}http://localhost:{}/{}",
            format!("{}:", example.title()),
            port,
            example.relative_path()
        ));
    }

    lines.extend([
        String::new(),
        "💡 Tips:".to_string(),
        "  • Try zooming with mouse wheel on line/scatter charts".to_string(),
        "  • Hover over data points to see tooltips".to_string(),
        "  • Click buttons to toggle themes and apply filters".to_string(),
        String::new(),
        "⌨️  Press Ctrl+C to stop the server".to_string(),
        String::new(),
        "─".repeat(68),
    ]);

    lines.join("\n")
}

async fn directory_listing(root: &Path, uri: &Uri) -> Response {
    let Some(relative) = request_path(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let dir = root.join(&relative);
    let mut reader = match tokio::fs::read_dir(&dir).await {
        Ok(reader) => reader,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    let mut names = Vec::new();
    loop {
        match reader.next_entry().await {
            Ok(Some(entry)) => {
                let mut name = entry.file_name().to_string_lossy().to_string();
                if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                    name.push('/');
                }
                names.push(name);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to list {}: {}", dir.display(), e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }
    names.sort_by_key(|name| name.to_lowercase());

    let base = if uri.path().ends_with('/') {
        uri.path().to_string()
    } else {
        format!("{}/", uri.path())
    };
    Html(render_listing(&base, &names)).into_response()
}

/// Decodes a request path into a path relative to the root, refusing `..`.
fn request_path(raw: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    let mut path = PathBuf::new();

    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => path.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}

fn render_listing(base: &str, names: &[String]) -> String {
    let title = format!(
        "Directory listing for {}",
        escape_html(&percent_decode_str(base).decode_utf8_lossy())
    );

    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{0}</title>\n</head>\n<body>\n<h1>{0}</h1>\n<hr>\n<ul>\n",
        title
    );
    for name in names {
        let (stem, suffix) = match name.strip_suffix('/') {
            Some(stem) => (stem, "/"),
            None => (name.as_str(), ""),
        };
        html.push_str(&format!(
            "<li><a href=\"{}{}{}\">{}</a></li>\n",
            escape_html(base),
            utf8_percent_encode(stem, PATH_SEGMENT),
            suffix,
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve;

    #[test]
    fn test_page_url_for_bar() {
        let entry = resolve(Some("bar"));
        assert_eq!(
            page_url(8000, &entry),
            "http://localhost:8000/examples/bar-chart.html"
        );
    }

    #[test]
    fn test_banner_lists_every_example() {
        let entry = resolve(None);
        let banner = render_banner(3000, &entry);

        assert!(banner.contains("🚀 Server started on port 3000"));
        assert!(banner.contains("📊 Opening: Main Demo"));
        assert!(banner.contains("🌐 URL: http://localhost:3000/index.html"));
        for example in Example::ALL {
            assert!(banner.contains(&format!(
                "http://localhost:3000/{}",
                example.relative_path()
            )));
        }
        assert!(banner.contains("  • Main Demo:        http://localhost:3000/index.html"));
    }

    #[test]
    fn test_request_path_refuses_parent_dirs() {
        assert_eq!(request_path("/dist/"), Some(PathBuf::from("dist")));
        assert_eq!(request_path("/"), Some(PathBuf::new()));
        assert_eq!(
            request_path("/my%20charts/"),
            Some(PathBuf::from("my charts"))
        );
        assert_eq!(request_path("/dist/../../etc/"), None);
        assert_eq!(request_path("/%2e%2e/"), None);
    }

    #[test]
    fn test_render_listing_escapes_names() {
        let names = vec!["a b.html".to_string(), "<x>".to_string(), "sub/".to_string()];
        let html = render_listing("/examples/", &names);

        assert!(html.contains("<title>Directory listing for /examples/</title>"));
        assert!(html.contains("<a href=\"/examples/a%20b.html\">a b.html</a>"));
        assert!(html.contains("<a href=\"/examples/%3Cx%3E\">&lt;x&gt;</a>"));
        assert!(html.contains("<a href=\"/examples/sub/\">sub/</a>"));
    }
}
