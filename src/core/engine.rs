use crate::adapters::FileSink;
use crate::core::scanner::FactorScanner;
use crate::domain::model::ScanSummary;
use crate::domain::ports::{ConfigProvider, FactorSink};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::io::Write;
use std::time::Duration;

pub const BANNER: &str = "Running subprocess";

pub struct FixtureEngine<C: ConfigProvider> {
    config: C,
    monitor: SystemMonitor,
}

impl<C: ConfigProvider> FixtureEngine<C> {
    pub fn new(config: C) -> Self {
        let enabled = config.monitoring_enabled();
        Self::new_with_monitoring(config, enabled)
    }

    pub fn new_with_monitoring(config: C, monitor_enabled: bool) -> Self {
        Self {
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Prints the banner to `console`, then writes every factor line to the
    /// configured output file.
    pub fn run<W: Write>(&self, console: &mut W) -> Result<ScanSummary> {
        // banner 必須在開檔之前輸出
        writeln!(console, "{}", BANNER)?;
        console.flush()?;

        self.monitor.log_stats("Start");

        let mut sink = FileSink::create(self.config.output_path())?;

        let scanner = FactorScanner::new(self.config.upper_bound())
            .with_delay(Duration::from_micros(self.config.delay_micros()));
        tracing::info!(
            "🔍 Scanning factors of 1..{} into {}",
            scanner.upper_bound(),
            sink.path().display()
        );

        let summary = scanner.run(&mut sink)?;
        sink.finish()?;

        self.monitor.log_stats("Scan finished");
        self.monitor.log_final_stats(&summary);

        tracing::info!(
            "✅ Wrote {} factor lines for {} values in {:?}",
            summary.lines_written,
            summary.values_scanned,
            summary.elapsed
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verify::{verify_file, VerifyOptions};
    use crate::utils::error::FixtureError;
    use tempfile::TempDir;

    struct TestConfig {
        output_path: String,
        upper_bound: u64,
    }

    impl ConfigProvider for TestConfig {
        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn upper_bound(&self) -> u64 {
            self.upper_bound
        }

        fn delay_micros(&self) -> u64 {
            0
        }

        fn monitoring_enabled(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_run_writes_banner_and_factors() {
        let dir = TempDir::new().unwrap();
        let output_path = dir.path().join("factors.txt");
        let engine = FixtureEngine::new(TestConfig {
            output_path: output_path.to_str().unwrap().to_string(),
            upper_bound: 500,
        });

        let mut console = Vec::new();
        let summary = engine.run(&mut console).unwrap();

        assert_eq!(String::from_utf8(console).unwrap(), "Running subprocess\n");
        assert_eq!(summary.values_scanned, 499);

        let options = VerifyOptions {
            allow_partial: false,
            expected_upper_bound: Some(500),
        };
        let report = verify_file(&output_path, options).unwrap();
        assert_eq!(report.lines, summary.lines_written);
        assert_eq!(report.last_value, Some(499));
    }

    #[test]
    fn test_open_failure_still_prints_banner() {
        let dir = TempDir::new().unwrap();
        let output_path = dir.path().join("missing").join("factors.txt");
        let engine = FixtureEngine::new(TestConfig {
            output_path: output_path.to_str().unwrap().to_string(),
            upper_bound: 10,
        });

        let mut console = Vec::new();
        let err = engine.run(&mut console).unwrap_err();

        assert_eq!(String::from_utf8(console).unwrap(), "Running subprocess\n");
        assert!(matches!(err, FixtureError::OpenOutput { .. }));
        assert_eq!(err.exit_code(), crate::utils::error::EX_OSFILE);
    }
}
