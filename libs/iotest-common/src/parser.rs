/// Test-Spec Parser
///
/// **Input format** (one test case per line):
/// ```text
/// Test Case 1: Enter number: 5 Enter number 3: 6 Expected Output: 11
/// ```
///
/// **Extraction rules:**
/// - Everything before the first `Output:` is the field descriptor
/// - Everything after the first `Output: ` is the expected output
/// - Every value starts right after a `": "` and runs up to the next space
/// - The first value is treated as a header and dropped
///   (see `ParseOptions::keep_first_value`)
///
/// Lines without the marker, and lines whose descriptor holds no values,
/// contribute nothing.

use crate::config::{FIELD_DELIMITER, OUTPUT_MARKER, OUTPUT_PREFIX, VALUE_TERMINATOR};
use crate::types::TestCase;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read test spec '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: 'Output:' is not followed by an expected output")]
    MissingExpectedOutput { line: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep the first captured value instead of treating it as a header
    pub keep_first_value: bool,
}

/// Read and parse a spec file
pub fn parse_file(path: &Path, options: ParseOptions) -> Result<Vec<TestCase>, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_str(&content, options)
}

/// Parse spec text into test cases, in file order
pub fn parse_str(content: &str, options: ParseOptions) -> Result<Vec<TestCase>, ParseError> {
    let mut cases = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;

        let Some((descriptor, expected)) = split_line(raw) else {
            continue;
        };
        let mut values = field_values(descriptor);
        if values.is_empty() {
            warn!(line, "Spec line has no field values; skipping");
            continue;
        }
        let expected = expected.ok_or(ParseError::MissingExpectedOutput { line })?;
        if !options.keep_first_value {
            values.remove(0);
        }

        let id = cases.len() as u32 + 1;
        debug!(id, line, inputs = values.len(), "Parsed test case");

        cases.push(TestCase {
            id,
            line,
            inputs: values.into_iter().map(str::to_string).collect(),
            expected_output: expected.to_string(),
        });
    }

    Ok(cases)
}

/// Split a line at the output marker.
///
/// Returns `None` when the marker is absent. The expected output is `None`
/// when the marker is not followed by a space.
fn split_line(line: &str) -> Option<(&str, Option<&str>)> {
    let marker = line.find(OUTPUT_MARKER)?;
    let descriptor = &line[..marker];
    let expected = line
        .find(OUTPUT_PREFIX)
        .map(|start| &line[start + OUTPUT_PREFIX.len()..]);

    Some((descriptor, expected))
}

/// Collect every value that follows a `": "` delimiter, left to right.
///
/// A value ends at the next space; a value with no space after it is not
/// captured. Scanning resumes at the terminating space, so a delimiter
/// may share its colon with the end of the previous value. An empty value
/// (`":  "`) is followed by a value starting at that same space.
fn field_values(descriptor: &str) -> Vec<&str> {
    let bytes = descriptor.as_bytes();
    let delim = FIELD_DELIMITER.as_bytes();
    let mut values = Vec::new();
    let mut start = delim.len();

    while start <= bytes.len() {
        if &bytes[start - delim.len()..start] != delim {
            start += 1;
            continue;
        }

        match bytes[start..].iter().position(|&b| b == VALUE_TERMINATOR) {
            Some(0) => {
                values.push("");
                // After an empty value the same position may still open a
                // non-empty one, running up to the following space
                match bytes[start + 1..].iter().position(|&b| b == VALUE_TERMINATOR) {
                    Some(len) => {
                        let end = start + 1 + len;
                        values.push(&descriptor[start..end]);
                        start = end;
                    }
                    None => break,
                }
            }
            Some(len) => {
                values.push(&descriptor[start..start + len]);
                start += len;
            }
            None => break,
        }
    }

    values
}
