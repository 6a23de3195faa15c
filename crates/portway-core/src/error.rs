use thiserror::Error;

/// Error type for the core crate.
///
/// Wraps API-surface failures and adds the rejections that originate in
/// the view-model layer itself (validation, the category-coverage guard,
/// voucher state rules). The CLI maps these into diagnostics.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Failure from the REST surface (transport, auth, 409s, decoding).
    #[error(transparent)]
    Api(#[from] portway_api::Error),

    /// Client-side validation failure — no request was sent.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A manual block cannot be removed while an active category still
    /// covers the same domain.
    #[error(
        "cannot remove {domain}: it is covered by the active \"{category}\" category -- disable the category first"
    )]
    CategoryCovered { domain: String, category: String },

    /// Lookup failure against the local snapshot.
    #[error("{entity} '{identifier}' not found")]
    NotFound { entity: String, identifier: String },

    /// Voucher claims are one-way; a claimed voucher stays claimed.
    #[error("voucher {code} has already been claimed")]
    VoucherAlreadyClaimed { code: String },
}

impl CoreError {
    /// True when a fresh login might resolve the failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth())
    }

    /// True for duplicate-resource rejections from the backend.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_conflict())
    }
}
