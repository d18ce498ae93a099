use crate::domain::model::FactorLine;
use crate::utils::error::Result;

/// Destination for factor lines. Every `write_line` must be visible to
/// other readers of the destination before it returns.
pub trait FactorSink {
    fn write_line(&mut self, line: &FactorLine) -> Result<()>;
    fn finish(self) -> Result<()>;
}

pub trait ConfigProvider {
    fn output_path(&self) -> &str;
    fn upper_bound(&self) -> u64;
    fn delay_micros(&self) -> u64;
    fn monitoring_enabled(&self) -> bool;
}
