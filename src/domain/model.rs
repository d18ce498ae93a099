use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const LINE_PREFIX: &str = "Found a factor of i for i = ";
const J_SEPARATOR: &str = ", j = ";

/// One record of the factors file: `j` divides `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactorLine {
    pub i: u64,
    pub j: u64,
}

impl FactorLine {
    pub fn new(i: u64, j: u64) -> Self {
        Self { i, j }
    }

    pub fn is_factor(&self) -> bool {
        self.j != 0 && self.i % self.j == 0
    }
}

impl fmt::Display for FactorLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", LINE_PREFIX, self.i, J_SEPARATOR, self.j)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFactorLineError {
    pub content: String,
}

impl fmt::Display for ParseFactorLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a factor line: {:?}", self.content)
    }
}

impl std::error::Error for ParseFactorLineError {}

fn parse_decimal(s: &str) -> Option<u64> {
    // u64::from_str 會接受前導 '+'，這裡只接受純數字
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for FactorLine {
    type Err = ParseFactorLineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseFactorLineError {
            content: s.to_string(),
        };

        let body = s
            .strip_suffix("\r\n")
            .or_else(|| s.strip_suffix('\n'))
            .unwrap_or(s);
        let rest = body.strip_prefix(LINE_PREFIX).ok_or_else(err)?;
        let (i, j) = rest.split_once(J_SEPARATOR).ok_or_else(err)?;

        Ok(Self {
            i: parse_decimal(i).ok_or_else(err)?,
            j: parse_decimal(j).ok_or_else(err)?,
        })
    }
}

/// Number of divisors of `n`, counting 1 and `n` itself. Zero has none here.
pub fn divisor_count(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut count = 0;
    let mut d = 1u64;
    while d <= n / d {
        if n % d == 0 {
            count += if d == n / d { 1 } else { 2 };
        }
        d += 1;
    }
    count
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub values_scanned: u64,
    pub lines_written: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub lines: u64,
    pub distinct_values: u64,
    pub last_value: Option<u64>,
    /// 最後一個 i 是否已寫滿所有因數
    pub complete: bool,
}
