//! Miette-based error diagnostics for CLI error presentation.
//!
//! Crate errors are converted into a [`CliDiagnostic`] carrying a stable
//! code and, where one helps, a suggestion. TOML syntax errors additionally
//! point at the offending span of the configuration file.

use std::fmt::Display;
use std::path::Path;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

use crate::domain::error::{DataValidationError, SlotError};
use crate::error::{ConfigError, Error, SolverError};

/// Error rendered at the CLI boundary.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliDiagnostic {
    pub message: String,
    pub code: String,
    pub help: Option<String>,
    pub src: Option<NamedSource<String>>,
    pub span: Option<SourceSpan>,
}

impl Diagnostic for CliDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

impl CliDiagnostic {
    #[must_use]
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: format!("linestack::{code}"),
            help: None,
            src: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attach the file content and the byte range to underline.
    #[must_use]
    pub fn with_source(mut self, name: &str, content: String, offset: usize, len: usize) -> Self {
        self.src = Some(NamedSource::new(name, content));
        self.span = Some((offset, len).into());
        self
    }
}

/// Build the diagnostic for `err`.
///
/// `config_path` is the file the failed command read, used to show the
/// source of TOML syntax errors.
#[must_use]
pub fn diagnose(err: &Error, config_path: Option<&Path>) -> CliDiagnostic {
    match err {
        Error::Config(ConfigError::Parse(parse)) => {
            let diag = CliDiagnostic::new("config::parse", "failed to parse config")
                .with_help(parse.message().to_string());
            match (config_path, parse.span()) {
                (Some(path), Some(span)) => match std::fs::read_to_string(path) {
                    Ok(content) => diag.with_source(
                        &path.display().to_string(),
                        content,
                        span.start,
                        span.len(),
                    ),
                    Err(_) => diag,
                },
                _ => diag,
            }
        }
        Error::Config(ConfigError::ReadFile(_)) => CliDiagnostic::new("config::read", err.to_string())
            .with_help("pass --config <PATH> or create ~/.linestack/config.toml"),
        Error::Config(ConfigError::MissingField { field: "rules" }) => {
            CliDiagnostic::new("config::rules", err.to_string())
                .with_help("site = \"custom\" needs a full [rules] table in the config file")
        }
        Error::Config(ConfigError::InvalidValue { field: "overlap", .. }) => {
            CliDiagnostic::new("config::overlap", err.to_string())
                .with_help("lower --overlap; lineups must differ by at least one player")
        }
        Error::Config(_) => CliDiagnostic::new("config", err.to_string())
            .with_help("run `linestack config validate` to check the file"),
        Error::Validation(validation) => {
            let help = match validation {
                DataValidationError::EmptyRoster { .. } => {
                    "both the skaters and the goalies file need at least one row"
                }
                DataValidationError::InvalidPosition { .. } => {
                    "positions are C, W (or LW/RW) and D, joined with '/' for dual eligibility"
                }
                _ => "rows are numbered from 0 after the header",
            };
            CliDiagnostic::new("input", err.to_string()).with_help(help)
        }
        Error::Csv(_) => CliDiagnostic::new("input::csv", err.to_string())
            .with_help("check that the file exists and has a header row"),
        Error::Solver(SolverError::Backend { .. }) => {
            CliDiagnostic::new("solver", err.to_string())
                .with_help("the solve was retried once; try a longer --time-limit")
        }
        Error::Solver(SolverError::InconsistentSolution { .. }) => {
            CliDiagnostic::new("solver::inconsistent", err.to_string())
        }
        Error::Slot(SlotError::NoGoalieSlot { .. } | SlotError::Unplaceable { .. }) => {
            CliDiagnostic::new("slots", err.to_string())
                .with_help("the roster slots cannot hold the selected positions; check the site rules")
        }
        Error::Io(_) => CliDiagnostic::new("io", err.to_string()),
        Error::Prompt(_) => CliDiagnostic::new("prompt", err.to_string())
            .with_help("pass --site to skip the prompt"),
        Error::Task(_) => CliDiagnostic::new("task", err.to_string()),
    }
}
