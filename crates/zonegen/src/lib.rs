//! `zonegen`: a cross-zone RPC IDL compiler. Wires the semantic model,
//! scope resolver, fingerprint generator, parameter classifier, and
//! multi-stream emitter crates into a single CLI binary.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;

pub use cli::Cli;
pub use config::CompileOptions;
pub use error::CliError;
