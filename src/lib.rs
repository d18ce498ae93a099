pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::FileSink;
pub use config::FixtureConfig;
pub use core::{engine::FixtureEngine, scanner::FactorScanner};
pub use domain::model::{divisor_count, FactorLine, ScanSummary, VerifyReport};
pub use utils::error::{FixtureError, Result};
