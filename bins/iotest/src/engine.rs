/// Process Engine - Runs the Target Program Once per Test Case
///
/// **Responsibility:**
/// Spawn the program, feed it the test inputs over stdin and capture stdout.
///
/// **Execution Rules:**
/// 1. Program is started with no arguments
/// 2. Inputs are written one per line, without a trailing newline, then stdin is closed
/// 3. Stdout is read until the child closes it and the child has exited
/// 4. Stderr is inherited and passes straight through
/// 5. Output must be 7-bit ASCII; lines are joined with single spaces
///
/// The engine does NOT judge the output (evaluator's job). There is no
/// timeout: a program that never exits blocks the run.

use iotest_common::config::OUTPUT_JOINER;
use iotest_common::types::TestCase;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start '{}'", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write input to '{}'", program.display())]
    WriteInput {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect output of '{}'", program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output of '{}' is not ASCII: byte 0x{byte:02x} at offset {offset}", program.display())]
    NonAsciiOutput {
        program: PathBuf,
        byte: u8,
        offset: usize,
    },
}

/// Raw execution output for a single test case
/// Produced by ProcessEngine, consumed by the evaluator
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub test_id: u32,
    /// Stdout lines joined with single spaces
    pub stdout: String,
    pub exit_code: Option<i32>,
    pub execution_time_ms: u64,
}

pub struct ProcessEngine {
    program: PathBuf,
}

impl ProcessEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run the program against one test case and wait for it to exit
    pub async fn run(&self, test_case: &TestCase) -> Result<RunOutput, EngineError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let start = Instant::now();
        let payload = test_case.stdin_payload();

        // Feed stdin while stdout is drained so neither pipe can fill up and stall
        let stdin = child.stdin.take();
        let writer = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            stdin.write_all(payload.as_bytes()).await?;
            stdin.shutdown().await
        };

        let (written, output) = tokio::join!(writer, child.wait_with_output());

        match written {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                warn!(
                    test_id = test_case.id,
                    "Program exited before reading all of its input"
                );
            }
            Err(source) => {
                return Err(EngineError::WriteInput {
                    program: self.program.clone(),
                    source,
                })
            }
        }

        let output = output.map_err(|source| EngineError::Wait {
            program: self.program.clone(),
            source,
        })?;
        let execution_time_ms = start.elapsed().as_millis() as u64;

        let stdout = decode_ascii(&output.stdout).map_err(|(offset, byte)| {
            EngineError::NonAsciiOutput {
                program: self.program.clone(),
                byte,
                offset,
            }
        })?;

        debug!(
            test_id = test_case.id,
            exit_code = ?output.status.code(),
            execution_ms = execution_time_ms,
            stdout_bytes = output.stdout.len(),
            "Program finished"
        );

        Ok(RunOutput {
            test_id: test_case.id,
            stdout: join_lines(stdout),
            exit_code: output.status.code(),
            execution_time_ms,
        })
    }
}

/// Decode 7-bit text, reporting the first offending byte and its offset
fn decode_ascii(bytes: &[u8]) -> Result<&str, (usize, u8)> {
    match bytes.iter().position(|b| !b.is_ascii()) {
        Some(offset) => Err((offset, bytes[offset])),
        // All bytes are ASCII, so this cannot fail
        None => std::str::from_utf8(bytes).map_err(|_| (0, 0)),
    }
}

/// Split on every ASCII line boundary and join with single spaces.
///
/// Boundaries are `\n`, `\r`, `\r\n`, vertical tab, form feed and the
/// file/group/record separators. A trailing boundary does not produce an
/// empty last line.
fn join_lines(text: &str) -> String {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(is_line_boundary) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines.join(OUTPUT_JOINER)
}

fn is_line_boundary(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e')
}
