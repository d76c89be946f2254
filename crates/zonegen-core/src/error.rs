//! Shared diagnostic taxonomy.
//!
//! Every phase of the compiler (resolve, fingerprint, classify, emit) raises
//! one of these kinds on malformed input. All are fatal to the compilation
//! unit — there is no recoverable-error path inside a single IDL compile.

use thiserror::Error;

/// Errors raised by the pure text/attribute utilities and shared by every
/// downstream crate via `#[from]`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    /// Unbalanced `<...>` in a type string.
    #[error("malformed template type (unbalanced '<>'): {text}")]
    MalformedTemplate { text: String },

    /// `rpc::shared_ptr<` with no matching `>`.
    #[error("malformed shared_ptr wrapper (missing '>'): {text}")]
    MalformedSharedPtr { text: String },
}
