use crate::domain::model::{FactorLine, ScanSummary};
use crate::domain::ports::FactorSink;
use crate::utils::error::Result;
use std::time::{Duration, Instant};

pub const DEFAULT_UPPER_BOUND: u64 = 100_000;

/// Brute-force factor search over `1 .. upper_bound`.
#[derive(Debug, Clone)]
pub struct FactorScanner {
    upper_bound: u64,
    delay: Option<Duration>,
}

impl FactorScanner {
    pub fn new(upper_bound: u64) -> Self {
        Self {
            upper_bound,
            delay: None,
        }
    }

    /// Sleep this long after every emitted line. Zero disables the delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }

    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    pub fn run<S: FactorSink>(&self, sink: &mut S) -> Result<ScanSummary> {
        let start = Instant::now();
        let mut summary = ScanSummary::default();

        for i in 1..self.upper_bound {
            // j <= i，包含 i 本身
            for j in 1..=i {
                if i % j == 0 {
                    sink.write_line(&FactorLine::new(i, j))?;
                    summary.lines_written += 1;

                    if let Some(delay) = self.delay {
                        std::thread::sleep(delay);
                    }
                }
            }
            summary.values_scanned += 1;

            if i % 10_000 == 0 {
                tracing::debug!("Scanned up to i = {} ({} lines)", i, summary.lines_written);
            }
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }
}

impl Default for FactorScanner {
    fn default() -> Self {
        Self::new(DEFAULT_UPPER_BOUND)
    }
}
