use crate::config::FixtureConfig;
use crate::utils::error::{FixtureError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub output: Option<OutputConfig>,
    pub scan: Option<ScanConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    pub upper_bound: Option<u64>,
    pub delay_micros: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| FixtureError::ConfigError {
                message: format!("Cannot read config file '{}': {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FixtureError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FACTORS_PATH})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FixtureError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// 將檔案中有設定的欄位覆蓋到 `config`
    pub fn apply_to(&self, config: &mut FixtureConfig) {
        if let Some(path) = self.output.as_ref().and_then(|o| o.path.clone()) {
            config.output_path = path;
        }
        if let Some(scan) = &self.scan {
            if let Some(upper_bound) = scan.upper_bound {
                config.upper_bound = upper_bound;
            }
            if let Some(delay) = scan.delay_micros {
                config.delay_micros = delay;
            }
        }
        if let Some(monitoring) = &self.monitoring {
            config.monitor = monitoring.enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[output]
path = "out/factors.txt"

[scan]
upper_bound = 200000
delay_micros = 100

[monitoring]
enabled = true
"#;

        let file_config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = FixtureConfig::default();
        file_config.apply_to(&mut config);

        assert_eq!(config.output_path, "out/factors.txt");
        assert_eq!(config.upper_bound, 200_000);
        assert_eq!(config.delay_micros, 100);
        assert!(config.monitor);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let file_config = TomlConfig::from_toml_str("").unwrap();
        let mut config = FixtureConfig::default();
        file_config.apply_to(&mut config);
        assert_eq!(config, FixtureConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FACTOR_FIXTURE_TEST_OUTPUT", "env-dir/factors.txt");

        let toml_content = r#"
[output]
path = "${FACTOR_FIXTURE_TEST_OUTPUT}"
"#;

        let file_config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            file_config.output.unwrap().path.as_deref(),
            Some("env-dir/factors.txt")
        );

        std::env::remove_var("FACTOR_FIXTURE_TEST_OUTPUT");
    }

    #[test]
    fn test_unset_env_var_left_verbatim() {
        let toml_content = r#"
[output]
path = "${FACTOR_FIXTURE_SURELY_UNSET_VAR}"
"#;
        let file_config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            file_config.output.unwrap().path.as_deref(),
            Some("${FACTOR_FIXTURE_SURELY_UNSET_VAR}")
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = TomlConfig::from_toml_str("[scan]\nupperbound = 5\n").unwrap_err();
        assert!(matches!(err, FixtureError::ConfigError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let file_config = TomlConfig::from_toml_str("[scan]\nupper_bound = 0\n").unwrap();
        let mut config = FixtureConfig::default();
        file_config.apply_to(&mut config);
        assert!(config.validate().is_err());
    }
}
