//! Error types emitted by the freight CLI.
//!
//! Lookup failures never surface here: the planner absorbs them. These are
//! the input, configuration and output failures that stop a run.

use std::sync::Arc;

use camino::Utf8PathBuf;
use freight_core::StopListError;
use thiserror::Error;

/// Errors emitted by the freight CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass <path> or set {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option was set to a value the planner cannot use.
    #[error("invalid {field}: {reason}")]
    InvalidOption {
        field: &'static str,
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the stop list file failed.
    #[error("failed to open stop list at {path:?}: {source}")]
    OpenStops {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Stop list JSON could not be decoded.
    #[error("failed to parse stop list JSON at {path:?}: {source}")]
    ParseStops {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The stop list is empty or repeats a sequence number.
    #[error("stop list in {path:?} is invalid: {source}")]
    InvalidStops {
        path: Utf8PathBuf,
        #[source]
        source: StopListError,
    },
    /// Serialising the route plan failed.
    #[error("failed to serialise route plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
