//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use portway_core::{ApiError, CoreError};

/// Exit codes.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the portal backend")]
    #[diagnostic(
        code(portway::connection_failed),
        help(
            "Check that the backend is running and the portal URL is right.\n\
             Try: portway stats --portal <url>"
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not logged in")]
    #[diagnostic(
        code(portway::not_logged_in),
        help("Run: portway login\nOr set PORTWAY_TOKEN.")
    )]
    NotLoggedIn,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(portway::auth_failed),
        help("The stored session may have expired. Run: portway login")
    )]
    AuthFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(portway::not_found),
        help("Run: portway {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Conflict: {message}")]
    #[diagnostic(code(portway::conflict))]
    Conflict { message: String },

    /// The category-coverage guard: removal was rejected before any
    /// request was sent.
    #[error("{domain} is covered by the active \"{category}\" category")]
    #[diagnostic(
        code(portway::category_covered),
        help("Disable the category first: portway filtering toggle \"{category}\"")
    )]
    CategoryCovered { domain: String, category: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Backend error: {message}")]
    #[diagnostic(code(portway::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(portway::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No portal configured")]
    #[diagnostic(
        code(portway::no_config),
        help(
            "Create a profile with: portway config init\n\
             Or pass --portal <url>."
        )
    )]
    NoConfig,

    #[error(transparent)]
    #[diagnostic(code(portway::config))]
    Config(#[from] portway_config::ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(portway::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotLoggedIn | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } | Self::CategoryCovered { .. } => exit_code::CONFLICT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api) => match api {
                ApiError::MissingToken => CliError::NotLoggedIn,
                ApiError::Authentication { message } => CliError::AuthFailed { message },
                ApiError::Conflict { message } => CliError::Conflict { message },
                ApiError::Transport(e) => CliError::ConnectionFailed {
                    source: Box::new(e),
                },
                other => CliError::ApiError {
                    message: other.to_string(),
                },
            },

            CoreError::Validation { field, reason } => CliError::Validation { field, reason },

            CoreError::CategoryCovered { domain, category } => {
                CliError::CategoryCovered { domain, category }
            }

            CoreError::NotFound { entity, identifier } => CliError::NotFound {
                list_command: format!("{entity}s list"),
                resource_type: entity,
                identifier,
            },

            CoreError::VoucherAlreadyClaimed { code } => CliError::Conflict {
                message: format!("voucher {code} has already been claimed"),
            },
        }
    }
}
