use factor_fixture::core::verify::{verify_reader, VerifyOptions};
use factor_fixture::{divisor_count, FactorLine, FactorScanner, Result};
use factor_fixture::domain::ports::FactorSink;
use proptest::prelude::*;
use std::io::Cursor;

struct TextSink(String);

impl FactorSink for TextSink {
    fn write_line(&mut self, line: &FactorLine) -> Result<()> {
        self.0.push_str(&line.to_string());
        self.0.push('\n');
        Ok(())
    }

    fn finish(self) -> Result<()> {
        Ok(())
    }
}

fn naive_divisor_count(n: u64) -> u64 {
    (1..=n).filter(|d| n % d == 0).count() as u64
}

proptest! {
    #[test]
    fn divisor_count_matches_naive(n in 1u64..5_000) {
        prop_assert_eq!(divisor_count(n), naive_divisor_count(n));
    }

    #[test]
    fn factor_line_text_parses_back(i in 1u64..u64::MAX, j in 1u64..u64::MAX) {
        let line = FactorLine::new(i, j);
        prop_assert_eq!(line.to_string().parse::<FactorLine>(), Ok(line));
    }

    #[test]
    fn scanner_output_always_verifies(upper_bound in 1u64..400) {
        let mut sink = TextSink(String::new());
        let summary = FactorScanner::new(upper_bound).run(&mut sink).unwrap();

        let options = VerifyOptions {
            allow_partial: false,
            expected_upper_bound: Some(upper_bound),
        };
        let report = verify_reader(Cursor::new(sink.0), options).unwrap();
        prop_assert_eq!(report.lines, summary.lines_written);
        prop_assert_eq!(report.distinct_values, upper_bound - 1);
        prop_assert!(report.complete);
    }

    #[test]
    fn any_prefix_verifies_as_partial(upper_bound in 2u64..200, cut in 0usize..4_000) {
        let mut sink = TextSink(String::new());
        FactorScanner::new(upper_bound).run(&mut sink).unwrap();

        let text = sink.0;
        let cut = cut.min(text.len());
        let options = VerifyOptions {
            allow_partial: true,
            ..Default::default()
        };
        prop_assert!(verify_reader(Cursor::new(&text[..cut]), options).is_ok());
    }
}
