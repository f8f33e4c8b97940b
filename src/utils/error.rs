use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Toolchain command not available: {command}")]
    ToolchainMissing { command: String },

    #[error("Build command `{command}` failed: {status}")]
    BuildFailed { command: String, status: String },

    #[error("Port {port} is already in use")]
    PortInUse { port: u16 },

    #[error("Failed to bind port {port}: {source}")]
    BindError {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    ServerError(std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Toolchain,
    Build,
    Network,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 警告，繼續執行
    Low,
    /// 使用者可修正的錯誤
    High,
    /// 系統層級錯誤
    Critical,
}

impl LaunchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LaunchError::ToolchainMissing { .. } => ErrorCategory::Toolchain,
            LaunchError::BuildFailed { .. } => ErrorCategory::Build,
            LaunchError::PortInUse { .. }
            | LaunchError::BindError { .. }
            | LaunchError::ServerError(_) => ErrorCategory::Network,
            LaunchError::ConfigError { .. } | LaunchError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LaunchError::ToolchainMissing { .. } => ErrorSeverity::Low,
            LaunchError::BuildFailed { .. }
            | LaunchError::PortInUse { .. }
            | LaunchError::ConfigError { .. }
            | LaunchError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            LaunchError::BindError { .. } | LaunchError::ServerError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給操作者看的簡短診斷
    pub fn user_friendly_message(&self) -> String {
        match self {
            LaunchError::ToolchainMissing { command } => {
                format!("Warning: toolchain not available (checked `{}`)", command)
            }
            LaunchError::BuildFailed { command, status } => {
                format!("Build failed: `{}` {}", command, status)
            }
            LaunchError::PortInUse { port } => format!("Error: Port {} is already in use", port),
            LaunchError::BindError { port, source } => {
                format!("Error: could not listen on port {}: {}", port, source)
            }
            LaunchError::ServerError(e) => format!("Error: server stopped unexpectedly: {}", e),
            LaunchError::ConfigError { message } => format!("Invalid configuration: {}", message),
            LaunchError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid value '{}' for {}: {}", value, field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LaunchError::ToolchainMissing { command } => format!(
                "If the library is not built, you'll need to install the tool behind `{}`.",
                command
            ),
            LaunchError::BuildFailed { command, .. } => format!(
                "Please ensure `{}` runs in the project root and try again.",
                command
            ),
            LaunchError::PortInUse { port } => format!(
                "Try a different port: dataviz-launcher --port {}",
                alternate_port(*port)
            ),
            LaunchError::BindError { .. } => {
                "Check that the port is valid and that you are allowed to listen on it.".to_string()
            }
            LaunchError::ServerError(_) => {
                "Restart the launcher; run with --verbose for details.".to_string()
            }
            LaunchError::ConfigError { .. } | LaunchError::InvalidConfigValueError { .. } => {
                "Check the command line flags and the launcher TOML file.".to_string()
            }
        }
    }

    /// 非致命錯誤回傳 0，其餘皆為 1
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High | ErrorSeverity::Critical => 1,
        }
    }
}

/// Next port to suggest after `port`, staying inside the valid range.
pub fn alternate_port(port: u16) -> u16 {
    port.checked_add(1).unwrap_or(port - 1)
}

pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_in_use_suggests_next_port() {
        let err = LaunchError::PortInUse { port: 8000 };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("--port 8001"));
    }

    #[test]
    fn test_alternate_port_at_upper_bound() {
        assert_eq!(alternate_port(65535), 65534);
        assert_eq!(alternate_port(3000), 3001);
    }

    #[test]
    fn test_toolchain_missing_is_not_fatal() {
        let err = LaunchError::ToolchainMissing {
            command: "node --version".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_messages_name_the_configured_toolchain() {
        let missing = LaunchError::ToolchainMissing {
            command: "pnpm --version".to_string(),
        };
        assert!(missing.user_friendly_message().contains("pnpm --version"));
        assert!(missing.recovery_suggestion().contains("pnpm --version"));
        assert!(!missing.user_friendly_message().contains("Node.js"));

        let failed = LaunchError::BuildFailed {
            command: "pnpm build".to_string(),
            status: "exit status: 1".to_string(),
        };
        assert!(failed.user_friendly_message().contains("pnpm build"));
        assert!(failed.recovery_suggestion().contains("pnpm build"));
        assert!(!failed.recovery_suggestion().contains("npm are installed"));
    }

    #[test]
    fn test_io_failures_keep_their_port_context() {
        use std::error::Error as _;

        let err = LaunchError::BindError {
            port: 80,
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.user_friendly_message().contains("port 80"));
        assert!(err.source().is_some());

        let err = LaunchError::ServerError(std::io::Error::other("accept failed"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("accept failed"));
    }

    #[test]
    fn test_fatal_errors_exit_with_one() {
        let errors = vec![
            LaunchError::BuildFailed {
                command: "npm install".to_string(),
                status: "exit status: 1".to_string(),
            },
            LaunchError::BindError {
                port: 80,
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            },
            LaunchError::ConfigError {
                message: "bad".to_string(),
            },
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "{}", err);
        }
    }
}
