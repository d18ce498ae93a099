//! Checks a factors file against the fixture's output invariants: lines are
//! strictly ordered by `(i, j)`, every `j` divides its `i`, and every value
//! carries exactly its divisor count.

use crate::domain::model::{divisor_count, FactorLine, VerifyReport};
use crate::utils::error::{FixtureError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyOptions {
    /// Accept a file cut short by a killed writer: the last value may be
    /// missing some factors and the final line may lack its newline.
    pub allow_partial: bool,
    /// When set, a complete file must end with `upper_bound - 1`.
    pub expected_upper_bound: Option<u64>,
}

struct ValueTally {
    i: u64,
    found: u64,
}

impl ValueTally {
    fn check_complete(&self) -> Result<()> {
        let expected = divisor_count(self.i);
        if self.found != expected {
            return Err(FixtureError::DivisorCountMismatch {
                i: self.i,
                expected,
                found: self.found,
            });
        }
        Ok(())
    }
}

pub fn verify_file<P: AsRef<Path>>(path: P, options: VerifyOptions) -> Result<VerifyReport> {
    let file = File::open(path.as_ref())?;
    verify_reader(BufReader::new(file), options)
}

pub fn verify_reader<R: BufRead>(mut reader: R, options: VerifyOptions) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();
    let mut tally: Option<ValueTally> = None;
    let mut prev: Option<FactorLine> = None;
    let mut raw = Vec::new();
    let mut line_no = 0usize;

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        line_no += 1;

        if !raw.ends_with(b"\n") && options.allow_partial {
            // 被中斷的寫入只可能留下最後一行殘缺
            tracing::debug!("Ignoring unterminated trailing line {}", line_no);
            break;
        }
        let text = std::str::from_utf8(&raw).map_err(|_| FixtureError::MalformedLine {
            line_no,
            content: String::from_utf8_lossy(&raw).trim_end().to_string(),
        })?;
        let line = text
            .parse::<FactorLine>()
            .map_err(|_| FixtureError::MalformedLine {
                line_no,
                content: text.trim_end().to_string(),
            })?;

        if !line.is_factor() {
            return Err(FixtureError::NotAFactor {
                line_no,
                i: line.i,
                j: line.j,
            });
        }

        let expected_prev_i = prev.map(|p| p.i);
        if let Some(p) = prev {
            if line <= p {
                return Err(FixtureError::OrderViolation {
                    line_no,
                    prev_i: p.i,
                    prev_j: p.j,
                    i: line.i,
                    j: line.j,
                });
            }
        }

        if expected_prev_i != Some(line.i) {
            if let Some(upper_bound) = options.expected_upper_bound {
                if line.i >= upper_bound {
                    return Err(FixtureError::ValueOutOfRange {
                        line_no,
                        i: line.i,
                        upper_bound,
                    });
                }
            }
            if let Some(done) = tally.take() {
                done.check_complete()?;
            }
            // 每個 i 至少有因數 1，所以值必須連續出現
            let next_expected = expected_prev_i.map_or(1, |p| p + 1);
            if line.i != next_expected {
                return Err(FixtureError::DivisorCountMismatch {
                    i: next_expected,
                    expected: divisor_count(next_expected),
                    found: 0,
                });
            }
            tally = Some(ValueTally { i: line.i, found: 0 });
            report.distinct_values += 1;
        }

        if let Some(t) = tally.as_mut() {
            t.found += 1;
        }
        report.lines += 1;
        prev = Some(line);
    }

    report.last_value = tally.as_ref().map(|t| t.i);
    report.complete = match &tally {
        None => true,
        Some(t) => match t.check_complete() {
            Ok(()) => true,
            Err(e) if options.allow_partial => {
                tracing::debug!("Trailing value is incomplete: {}", e);
                false
            }
            Err(e) => return Err(e),
        },
    };

    if let Some(upper_bound) = options.expected_upper_bound {
        // 超出上限的值已在逐行檢查時回報
        let expected_last = upper_bound.checked_sub(1).filter(|v| *v > 0);
        if report.complete && report.last_value != expected_last {
            if options.allow_partial {
                report.complete = false;
            } else {
                let missing = report.last_value.map_or(1, |v| v + 1);
                return Err(FixtureError::DivisorCountMismatch {
                    i: missing,
                    expected: divisor_count(missing),
                    found: 0,
                });
            }
        }
    }

    Ok(report)
}
