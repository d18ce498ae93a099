pub mod toml_config;

use crate::core::scanner::DEFAULT_UPPER_BOUND;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_OUTPUT_PATH: &str = "test-files/factors.txt";

/// 上限：每行最多延遲一秒
pub const MAX_DELAY_MICROS: u64 = 1_000_000;

/// Resolved settings for one fixture run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub output_path: String,
    pub upper_bound: u64,
    pub delay_micros: u64,
    pub monitor: bool,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            upper_bound: DEFAULT_UPPER_BOUND,
            delay_micros: 0,
            monitor: false,
        }
    }
}

impl ConfigProvider for FixtureConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    fn delay_micros(&self) -> u64 {
        self.delay_micros
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

impl Validate for FixtureConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output.path", &self.output_path)?;
        validation::validate_positive_number("scan.upper_bound", self.upper_bound, 1)?;
        validation::validate_range("scan.delay_micros", self.delay_micros, 0, MAX_DELAY_MICROS)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "factor-fixture")]
#[command(about = "Writes every factor of 1..N to a file, flushing after each line")]
pub struct CliConfig {
    /// Output file, truncated on start
    #[arg(short, long)]
    pub output: Option<String>,

    /// Exclusive upper bound for i
    #[arg(short = 'n', long)]
    pub upper_bound: Option<u64>,

    /// Sleep after every written line, in microseconds
    #[arg(long)]
    pub delay_micros: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log CPU and memory usage of the run
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併順序：預設值 < TOML 檔 < 命令列
    pub fn resolve(&self) -> Result<FixtureConfig> {
        let mut config = FixtureConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from: {}", path);
            toml_config::TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(upper_bound) = self.upper_bound {
            config.upper_bound = upper_bound;
        }
        if let Some(delay) = self.delay_micros {
            config.delay_micros = delay;
        }
        if self.monitor {
            config.monitor = true;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_reproduce_fixture() {
        let cli = CliConfig::parse_from(["factor-fixture"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config, FixtureConfig::default());
        assert_eq!(config.output_path, "test-files/factors.txt");
        assert_eq!(config.upper_bound, 100_000);
        assert_eq!(config.delay_micros, 0);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[output]
path = "from-file.txt"

[scan]
upper_bound = 50
delay_micros = 10
"#
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "factor-fixture",
            "--config",
            file.path().to_str().unwrap(),
            "-n",
            "20",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.output_path, "from-file.txt");
        assert_eq!(config.upper_bound, 20);
        assert_eq!(config.delay_micros, 10);
    }

    #[test]
    fn test_invalid_upper_bound_rejected() {
        let cli = CliConfig::parse_from(["factor-fixture", "--upper-bound", "0"]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let cli = CliConfig::parse_from(["factor-fixture", "-c", "/nonexistent/fixture.toml"]);
        let err = cli.resolve().unwrap_err();
        assert_eq!(err.exit_code(), crate::utils::error::EX_CONFIG);
    }
}
