// Report rendering: human-readable lines or a JSON document
use crate::config::ReportFormat;
use anyhow::{Context, Result};
use iotest_common::types::{SuiteReport, TestResult, TestStatus};
use std::io::Write;

/// Writes results as they arrive. Human output is streamed per test;
/// JSON output is written once the run finished.
pub struct Reporter<W: Write> {
    format: ReportFormat,
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(format: ReportFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn test_finished(&mut self, result: &TestResult) -> Result<()> {
        if self.format == ReportFormat::Human {
            write_human(&mut self.out, result)?;
            self.out.flush().context("Failed to flush report")?;
        }
        Ok(())
    }

    pub fn suite_finished(&mut self, report: &SuiteReport) -> Result<()> {
        if self.format == ReportFormat::Json {
            serde_json::to_writer_pretty(&mut self.out, report)
                .context("Failed to serialize report")?;
            writeln!(self.out)?;
            self.out.flush().context("Failed to flush report")?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_human(out: &mut impl Write, result: &TestResult) -> Result<()> {
    match result.status {
        TestStatus::Passed => writeln!(out, "Test {} passed", result.test_id)?,
        TestStatus::Failed => {
            writeln!(out, "Test {} failed", result.test_id)?;
            writeln!(out, "Expected: {}", result.expected_output)?;
            writeln!(out, "Actual: {}", result.actual_output)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(test_id: u32, status: TestStatus, expected: &str, actual: &str) -> TestResult {
        TestResult {
            test_id,
            status,
            inputs: vec![],
            expected_output: expected.to_string(),
            actual_output: actual.to_string(),
            exit_code: Some(0),
            execution_time_ms: 0,
        }
    }

    fn render(format: ReportFormat, results: &[TestResult]) -> String {
        let mut reporter = Reporter::new(format, Vec::new());
        let mut report = SuiteReport::new("./prog", "tests.txt");
        for result in results {
            reporter.test_finished(result).unwrap();
            report.push(result.clone());
        }
        reporter.suite_finished(&report).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_human_passed() {
        let out = render(
            ReportFormat::Human,
            &[make_result(1, TestStatus::Passed, "5", "5")],
        );
        assert_eq!(out, "Test 1 passed\n");
    }

    #[test]
    fn test_human_failed() {
        let out = render(
            ReportFormat::Human,
            &[make_result(1, TestStatus::Failed, "5", "4")],
        );
        assert_eq!(out, "Test 1 failed\nExpected: 5\nActual: 4\n\n");
    }

    #[test]
    fn test_human_sequence() {
        let out = render(
            ReportFormat::Human,
            &[
                make_result(1, TestStatus::Passed, "a", "a"),
                make_result(2, TestStatus::Failed, "b", "c"),
                make_result(3, TestStatus::Passed, "d", "d"),
            ],
        );
        assert_eq!(
            out,
            "Test 1 passed\nTest 2 failed\nExpected: b\nActual: c\n\nTest 3 passed\n"
        );
    }

    #[test]
    fn test_json_report() {
        let out = render(
            ReportFormat::Json,
            &[
                make_result(1, TestStatus::Passed, "5", "5"),
                make_result(2, TestStatus::Failed, "5", "4"),
            ],
        );
        let parsed: SuiteReport = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed.total, 2);
        assert_eq!(parsed.passed, 1);
        assert_eq!(parsed.failed, 1);
        assert_eq!(parsed.results[1].actual_output, "4");
        assert!(!out.contains("Test 1 passed"));
    }
}
