use thiserror::Error;

use zonegen_emit::EmitError;

/// Top-level driver errors. `MissingIdl` and argument-parsing failures map
/// to exit code `-1`; everything else maps to exit code `1`, per the exit
/// code table.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IDL path does not exist: {0}")]
    MissingIdl(std::path::PathBuf),

    /// The lexer/preprocessor/parser pipeline that turns IDL text into a
    /// `Model` is an external collaborator (out of scope for this crate);
    /// `zonegen_model::ModelBuilder` is the supported way to construct one
    /// directly. This is the slot reserved for "a caught exception escaped
    /// from the parser".
    #[error("no textual IDL parser is wired in; build a Model with zonegen_model::ModelBuilder: {0}")]
    UnknownParse(String),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
