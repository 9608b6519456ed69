// Run configuration for iotest
use anyhow::{bail, Result};
use clap::ValueEnum;
use iotest_common::parser::ParseOptions;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One pass/fail line per test, printed as it finishes
    Human,
    /// A single JSON report once all tests ran
    Json,
}

impl ReportFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "human" => Ok(ReportFormat::Human),
            "json" => Ok(ReportFormat::Json),
            other => bail!("Invalid report format: {} (valid options: human, json)", other),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Human => write!(f, "human"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub format: Option<ReportFormat>,
    pub keep_first_value: bool,
    pub fail_on_mismatch: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub program: PathBuf,
    pub tests_path: PathBuf,
    pub format: ReportFormat,
    pub parse_options: ParseOptions,
    pub fail_on_mismatch: bool,
}

impl RunConfig {
    /// Build from CLI values, falling back to `IOTEST_*` environment variables
    pub fn load(program: PathBuf, tests_path: PathBuf, cli: CliOverrides) -> Result<Self> {
        Self::load_with(program, tests_path, cli, |key| std::env::var(key).ok())
    }

    fn load_with(
        program: PathBuf,
        tests_path: PathBuf,
        cli: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let format = match cli.format {
            Some(format) => format,
            None => {
                let value = env("IOTEST_FORMAT").unwrap_or_else(|| "human".to_string());
                ReportFormat::parse(&value)?
            }
        };

        let keep_first_value = cli.keep_first_value || env_flag(&env, "IOTEST_KEEP_FIRST_VALUE");
        let fail_on_mismatch = cli.fail_on_mismatch || env_flag(&env, "IOTEST_FAIL_ON_MISMATCH");

        Ok(Self {
            program,
            tests_path,
            format,
            parse_options: ParseOptions { keep_first_value },
            fail_on_mismatch,
        })
    }
}

fn env_flag(env: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    env(key)
        .unwrap_or_else(|| "false".to_string())
        .to_lowercase()
        == "true"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(cli: CliOverrides, vars: &[(&str, &str)]) -> Result<RunConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::load_with(
            PathBuf::from("./prog"),
            PathBuf::from("tests.txt"),
            cli,
            |key| vars.get(key).cloned(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load(CliOverrides::default(), &[]).unwrap();

        assert_eq!(config.format, ReportFormat::Human);
        assert!(!config.parse_options.keep_first_value);
        assert!(!config.fail_on_mismatch);
        assert_eq!(config.program, PathBuf::from("./prog"));
    }

    #[test]
    fn test_env_overrides() {
        let config = load(
            CliOverrides::default(),
            &[
                ("IOTEST_FORMAT", "JSON"),
                ("IOTEST_KEEP_FIRST_VALUE", "true"),
                ("IOTEST_FAIL_ON_MISMATCH", "TRUE"),
            ],
        )
        .unwrap();

        assert_eq!(config.format, ReportFormat::Json);
        assert!(config.parse_options.keep_first_value);
        assert!(config.fail_on_mismatch);
    }

    #[test]
    fn test_cli_wins_over_env() {
        let cli = CliOverrides {
            format: Some(ReportFormat::Human),
            ..Default::default()
        };
        let config = load(cli, &[("IOTEST_FORMAT", "json")]).unwrap();

        assert_eq!(config.format, ReportFormat::Human);
    }

    #[test]
    fn test_invalid_env_format() {
        let err = load(CliOverrides::default(), &[("IOTEST_FORMAT", "xml")]).unwrap_err();

        assert!(err.to_string().contains("xml"));
    }
}
