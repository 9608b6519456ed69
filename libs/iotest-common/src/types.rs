use serde::{Deserialize, Serialize};
use std::fmt;

/// One trial: the inputs fed to the target program and the text its
/// output must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// 1-based position in file order
    pub id: u32,
    /// 1-based line number in the spec file
    pub line: usize,
    pub inputs: Vec<String>,
    pub expected_output: String,
}

impl TestCase {
    /// Inputs as written to the program's stdin, one per line
    pub fn stdin_payload(&self) -> String {
        self.inputs.join(crate::config::INPUT_SEPARATOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "passed"),
            TestStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_id: u32,
    pub status: TestStatus,
    pub inputs: Vec<String>,
    pub expected_output: String,
    pub actual_output: String,
    pub exit_code: Option<i32>,
    pub execution_time_ms: u64,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Outcome of a whole run, in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub program: String,
    pub tests_path: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<TestResult>,
}

impl SuiteReport {
    pub fn new(program: impl Into<String>, tests_path: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            tests_path: tests_path.into(),
            total: 0,
            passed: 0,
            failed: 0,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: TestResult) {
        if result.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.total += 1;
        self.results.push(result);
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(test_id: u32, status: TestStatus) -> TestResult {
        TestResult {
            test_id,
            status,
            inputs: vec!["1".to_string()],
            expected_output: "1".to_string(),
            actual_output: "1".to_string(),
            exit_code: Some(0),
            execution_time_ms: 3,
        }
    }

    #[test]
    fn test_stdin_payload_has_no_trailing_newline() {
        let case = TestCase {
            id: 1,
            line: 1,
            inputs: vec!["2".to_string(), "3".to_string()],
            expected_output: "5".to_string(),
        };
        assert_eq!(case.stdin_payload(), "2\n3");
    }

    #[test]
    fn test_stdin_payload_empty_inputs() {
        let case = TestCase {
            id: 1,
            line: 1,
            inputs: vec![],
            expected_output: String::new(),
        };
        assert_eq!(case.stdin_payload(), "");
    }

    #[test]
    fn test_report_counts() {
        let mut report = SuiteReport::new("./prog", "tests.txt");
        report.push(make_result(1, TestStatus::Passed));
        report.push(make_result(2, TestStatus::Failed));
        report.push(make_result(3, TestStatus::Passed));

        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert_eq!(report.results[1].test_id, 2);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&TestStatus::Passed).unwrap();
        assert_eq!(json, "\"passed\"");
        assert_eq!(TestStatus::Failed.to_string(), "failed");
    }
}
