use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Demo pages shipped with the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Example {
    #[default]
    Demo,
    Line,
    Bar,
    Scatter,
    Pie,
}

impl Example {
    pub const ALL: [Example; 5] = [
        Example::Demo,
        Example::Line,
        Example::Bar,
        Example::Scatter,
        Example::Pie,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Example::Demo => "demo",
            Example::Line => "line",
            Example::Bar => "bar",
            Example::Scatter => "scatter",
            Example::Pie => "pie",
        }
    }

    pub fn relative_path(self) -> &'static str {
        match self {
            Example::Demo => "index.html",
            Example::Line => "examples/line-chart.html",
            Example::Bar => "examples/bar-chart.html",
            Example::Scatter => "examples/scatter-plot.html",
            Example::Pie => "examples/pie-chart.html",
        }
    }

    /// 頁面清單中使用的標題
    pub fn title(self) -> &'static str {
        match self {
            Example::Demo => "Main Demo",
            Example::Line => "Line Chart",
            Example::Bar => "Bar Chart",
            Example::Scatter => "Scatter Plot",
            Example::Pie => "Pie Chart",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Example::Demo => "Main demo with all chart types (default)",
            Example::Line => "Line chart example",
            Example::Bar => "Bar chart example",
            Example::Scatter => "Scatter plot example",
            Example::Pie => "Pie chart example",
        }
    }

    /// Case-insensitive lookup by id.
    pub fn lookup(id: &str) -> Option<Example> {
        Self::ALL
            .into_iter()
            .find(|example| example.id().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleEntry {
    pub example: Example,
    pub display_name: String,
}

impl ExampleEntry {
    pub fn id(&self) -> &'static str {
        self.example.id()
    }

    pub fn relative_path(&self) -> &'static str {
        self.example.relative_path()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub example: Option<String>,
    pub root: PathBuf,
    pub open_browser: bool,
}

impl ServerConfig {
    pub fn new(port: u16, root: impl Into<PathBuf>) -> Self {
        Self {
            port,
            example: None,
            root: root.into(),
            open_browser: true,
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn without_browser(mut self) -> Self {
        self.open_browser = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Present,
    Missing,
}

impl BuildState {
    /// 只檢查輸出目錄與標記檔是否存在，不比對內容新舊
    pub fn detect(root: &Path, output_dir: &Path, marker_file: &Path) -> Self {
        let output = root.join(output_dir);
        if output.is_dir() && output.join(marker_file).is_file() {
            BuildState::Present
        } else {
            BuildState::Missing
        }
    }
}

/// An external command line, e.g. `npm run build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutput {
    Suppressed,
    Inherited,
}

/// Exit status of a finished subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status: {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildReport {
    AlreadyBuilt,
    Built,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    Interrupted,
}
