use crate::domain::model::ToolCommand;
use crate::utils::error::{LaunchError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Toolchain and build layout used by the launcher.
///
/// Every section is optional in the TOML file; missing values fall back to
/// the npm based defaults (`npm install`, `npm run build`, `dist/index.js`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    pub toolchain: ToolchainConfig,
    pub build: BuildOutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// 版本查詢指令，全部成功才視為工具鏈存在
    pub probe: Vec<ToolCommand>,
    pub install: ToolCommand,
    pub build: ToolCommand,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            probe: vec![
                ToolCommand::new("node", ["--version"]),
                ToolCommand::new("npm", ["--version"]),
            ],
            install: ToolCommand::new("npm", ["install"]),
            build: ToolCommand::new("npm", ["run", "build"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOutputConfig {
    pub output_dir: PathBuf,
    pub marker_file: PathBuf,
}

impl Default for BuildOutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            marker_file: PathBuf::from("index.js"),
        }
    }
}

impl LauncherSettings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| LaunchError::ConfigError {
            message: format!(
                "cannot read launcher config '{}': {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LaunchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// 替換環境變數 (例如 ${NPM_BIN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LaunchError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for LauncherSettings {
    fn validate(&self) -> Result<()> {
        for (index, command) in self.toolchain.probe.iter().enumerate() {
            validation::validate_non_empty_string(
                &format!("toolchain.probe[{}].program", index),
                &command.program,
            )?;
        }
        validation::validate_non_empty_string(
            "toolchain.install.program",
            &self.toolchain.install.program,
        )?;
        validation::validate_non_empty_string(
            "toolchain.build.program",
            &self.toolchain.build.program,
        )?;

        validation::validate_relative_path("build.output_dir", &self.build.output_dir)?;
        validation::validate_relative_path("build.marker_file", &self.build.marker_file)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_npm_layout() {
        let settings = LauncherSettings::default();

        assert_eq!(settings.toolchain.probe.len(), 2);
        assert_eq!(settings.toolchain.install.to_string(), "npm install");
        assert_eq!(settings.toolchain.build.to_string(), "npm run build");
        assert_eq!(settings.build.output_dir, PathBuf::from("dist"));
        assert_eq!(settings.build.marker_file, PathBuf::from("index.js"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
[toolchain]
install = { program = "pnpm", args = ["install", "--frozen-lockfile"] }
build = { program = "pnpm", args = ["build"] }

[build]
output_dir = "build"
"#;

        let settings = LauncherSettings::from_toml_str(toml_content).unwrap();

        assert_eq!(
            settings.toolchain.install.to_string(),
            "pnpm install --frozen-lockfile"
        );
        assert_eq!(settings.toolchain.build.to_string(), "pnpm build");
        // probe and marker_file keep their defaults
        assert_eq!(settings.toolchain.probe.len(), 2);
        assert_eq!(settings.build.output_dir, PathBuf::from("build"));
        assert_eq!(settings.build.marker_file, PathBuf::from("index.js"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DATAVIZ_TEST_BUILD_TOOL", "yarn");

        let toml_content = r#"
[toolchain.build]
program = "${DATAVIZ_TEST_BUILD_TOOL}"
args = ["build"]
"#;

        let settings = LauncherSettings::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.toolchain.build.program, "yarn");

        std::env::remove_var("DATAVIZ_TEST_BUILD_TOOL");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = LauncherSettings::from_toml_str("[toolchain\nbuild = 1");
        assert!(matches!(result, Err(LaunchError::ConfigError { .. })));
    }

    #[test]
    fn test_validation_rejects_escaping_output_dir() {
        let toml_content = r#"
[build]
output_dir = "../elsewhere"
"#;

        let settings = LauncherSettings::from_toml_str(toml_content).unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[build]\nmarker_file = \"index.esm.js\"\n")
            .unwrap();

        let settings = LauncherSettings::load(Some(temp_file.path())).unwrap();
        assert_eq!(settings.build.marker_file, PathBuf::from("index.esm.js"));

        let defaults = LauncherSettings::load(None).unwrap();
        assert_eq!(defaults, LauncherSettings::default());
    }
}
