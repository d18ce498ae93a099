pub mod engine;
pub mod scanner;
pub mod verify;

pub use crate::domain::model::{FactorLine, ScanSummary, VerifyReport};
pub use crate::domain::ports::{ConfigProvider, FactorSink};
pub use crate::utils::error::Result;
