use crate::domain::model::{Example, ExampleEntry};

pub const DEFAULT_DISPLAY_NAME: &str = "Main Demo";

/// Maps an example id to its page.
///
/// Lookup ignores case. A missing or unknown id silently falls back to the
/// main demo; no error is raised.
pub fn resolve(example: Option<&str>) -> ExampleEntry {
    match example.and_then(Example::lookup) {
        Some(example) => ExampleEntry {
            example,
            display_name: format!("{} Chart Example", capitalize(example.id())),
        },
        None => {
            if let Some(unknown) = example {
                tracing::warn!("Unknown example '{}', opening the main demo", unknown);
            }
            ExampleEntry {
                example: Example::default(),
                display_name: DEFAULT_DISPLAY_NAME.to_string(),
            }
        }
    }
}

/// Example catalog printed by `--list`.
pub fn render_catalog() -> String {
    let mut lines = vec![String::new(), "📊 Available Examples:".to_string(), String::new()];

    for example in Example::ALL {
        lines.push(format!("  {:<10}- {}", example.id(), example.description()));
    }

    lines.extend([
        String::new(),
        "Usage:".to_string(),
        "  dataviz-launcher --example line".to_string(),
        "  dataviz-launcher --example bar".to_string(),
        String::new(),
    ]);
    lines.join("\n")
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
