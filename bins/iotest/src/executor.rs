/// Suite Executor - High-Level Orchestration
///
/// **Responsibility:**
/// Parse the spec file once, then run and judge every test case in file
/// order, one process at a time.
///
/// **Architecture:**
/// 1. Parser turns the spec file into test cases (iotest-common)
/// 2. ProcessEngine runs the program for one case (engine.rs)
/// 3. Evaluator judges the output (evaluator.rs)
/// 4. Reporter prints each verdict as soon as it is known (report.rs)
///
/// A mismatch is reported and the run continues. Any other failure
/// (unreadable spec, spawn failure, non-ASCII output) aborts the run;
/// verdicts already printed stay printed.

use crate::config::RunConfig;
use crate::engine::ProcessEngine;
use crate::evaluator;
use crate::report::Reporter;
use anyhow::{Context, Result};
use iotest_common::parser;
use iotest_common::types::{SuiteReport, TestCase};
use std::io::Write;
use tracing::{debug, info};

/// Parse the configured spec file and run every test case in it
pub async fn execute_suite<W: Write>(
    config: &RunConfig,
    reporter: &mut Reporter<W>,
) -> Result<SuiteReport> {
    let test_cases = parser::parse_file(&config.tests_path, config.parse_options)
        .context("Failed to parse test spec")?;

    info!(
        tests_path = %config.tests_path.display(),
        test_cases = test_cases.len(),
        "Parsed test spec"
    );

    let engine = ProcessEngine::new(config.program.clone());
    let mut report = SuiteReport::new(
        config.program.display().to_string(),
        config.tests_path.display().to_string(),
    );

    execute_cases(&engine, &test_cases, reporter, &mut report).await?;
    reporter.suite_finished(&report)?;

    info!(
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        "Run complete"
    );

    Ok(report)
}

/// Run each case to completion before starting the next
pub async fn execute_cases<W: Write>(
    engine: &ProcessEngine,
    test_cases: &[TestCase],
    reporter: &mut Reporter<W>,
    report: &mut SuiteReport,
) -> Result<()> {
    for test_case in test_cases {
        debug!(
            test_id = test_case.id,
            line = test_case.line,
            inputs = ?test_case.inputs,
            "Running test case"
        );

        let output = engine
            .run(test_case)
            .await
            .with_context(|| format!("Test {} (line {}) could not be run", test_case.id, test_case.line))?;

        let result = evaluator::evaluate_test(&output, test_case);

        debug!(
            test_id = result.test_id,
            status = %result.status,
            execution_ms = result.execution_time_ms,
            "Test result"
        );

        reporter.test_finished(&result)?;
        report.push(result);
    }

    Ok(())
}
