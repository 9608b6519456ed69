/// Test Evaluator - Output Matching
///
/// **Core Responsibility:**
/// Decide pass/fail for one run by substring containment.
///
/// **Matching Rules:**
/// - Passed iff the expected output occurs anywhere in the actual output
/// - Actual output is the program's stdout lines joined with single spaces
/// - No trimming, case folding or numeric tolerance
/// - An empty expected output always passes
/// - Exit status is recorded but never changes the verdict

use crate::engine::RunOutput;
use iotest_common::types::{TestCase, TestResult, TestStatus};

pub fn output_matches(expected: &str, actual: &str) -> bool {
    actual.contains(expected)
}

/// Evaluate a single run against its test case
pub fn evaluate_test(output: &RunOutput, test_case: &TestCase) -> TestResult {
    let status = if output_matches(&test_case.expected_output, &output.stdout) {
        TestStatus::Passed
    } else {
        TestStatus::Failed
    };

    TestResult {
        test_id: output.test_id,
        status,
        inputs: test_case.inputs.clone(),
        expected_output: test_case.expected_output.clone(),
        actual_output: output.stdout.clone(),
        exit_code: output.exit_code,
        execution_time_ms: output.execution_time_ms,
    }
}
