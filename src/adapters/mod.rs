// Adapters layer: implementations of the domain ports.
// `fake` never touches the host and backs the test suites; it is only
// compiled for unit tests or with the `testing` feature.

pub mod browser;
#[cfg(any(test, feature = "testing"))]
pub mod fake;
pub mod process;

pub use browser::SystemBrowser;
#[cfg(any(test, feature = "testing"))]
pub use fake::{FakeBrowser, FakeCommandRunner};
pub use process::SystemCommandRunner;
