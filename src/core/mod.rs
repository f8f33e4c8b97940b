pub mod builder;
pub mod launcher;
pub mod prober;
pub mod resolver;
pub mod server;

pub use crate::domain::model::{BuildReport, BuildState, Example, ExampleEntry, ServeOutcome, ServerConfig};
pub use crate::domain::ports::{BrowserOpener, CommandRunner};
pub use crate::utils::error::Result;
