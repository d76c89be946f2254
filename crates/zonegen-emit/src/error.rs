use thiserror::Error;
use zonegen_classify::ClassifyError;
use zonegen_core::error::CoreError;

/// Errors fatal to the whole emission of one model, matching the
/// "all fatal" propagation rule: no partial output files are ever written.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("reference to undeclared type '{name}' from '{context}'")]
    UnresolvedType { name: String, context: String },
}
