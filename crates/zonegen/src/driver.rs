//! Owns the fixed pipeline: build-or-receive model -> emit -> write. Buffers
//! every output stream fully in memory before any file touches disk, so a
//! fatal error partway through never leaves partial output on disk. The
//! "rewrite only if changed" filesystem check remains an external
//! collaborator.

use std::fs;
use std::path::Path;

use tracing::{info, instrument};
use zonegen_core::Model;
use zonegen_emit::{EmitOptions, Streams, emit_model};

use crate::config::CompileOptions;
use crate::error::CliError;

/// Exit codes matching the external-interfaces spec exactly (not clap's
/// usual exit-2-on-parse-error convention).
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FATAL: i32 = 1;
    pub const ARGUMENT_OR_IDL_ERROR: i32 = -1;
}

/// Runs the compiler end to end against an already-built [`Model`] (the
/// textual IDL lexer/preprocessor/parser is out of scope for this crate —
/// see [`CliError::UnknownParse`] for the entry point a future parser
/// would plug into) and returns the process exit code.
#[instrument(skip(model, options))]
pub fn run(model: &Model, options: &CompileOptions) -> i32 {
    if !options.idl_exists() {
        eprintln!("{}", CliError::MissingIdl(options.idl.clone()));
        return exit_code::ARGUMENT_OR_IDL_ERROR;
    }

    match compile_and_write(model, options) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            exit_code::FATAL
        }
    }
}

/// The testable core of the pipeline: classify/fingerprint/emit without any
/// filesystem access, so scenario tests can assert on stream contents
/// directly.
#[instrument(skip(model, options))]
pub fn compile(model: &Model, options: &CompileOptions) -> Result<Streams, CliError> {
    let emit_options = EmitOptions {
        module_name: options.module_name.clone(),
        namespaces: options.namespaces.clone(),
        caller_is_host: true,
    };
    let streams = emit_model(model, &emit_options)?;
    info!(module = %options.module_name, "emitted model");
    Ok(streams)
}

fn compile_and_write(model: &Model, options: &CompileOptions) -> Result<(), CliError> {
    let streams = compile(model, options)?;
    write_file(&options.layout.header, streams.header.as_str())?;
    write_file(&options.layout.proxy, streams.proxy.as_str())?;
    write_file(&options.layout.proxy_header, streams.proxy_header.as_str())?;
    write_file(&options.layout.stub, streams.stub.as_str())?;
    write_file(&options.layout.stub_header, streams.stub_header.as_str())?;
    // options.layout.mock is intentionally never written: gmock generation
    // is a deliberate scope cut, not an oversight (see DESIGN.md).
    Ok(())
}

/// Would build a [`Model`] by lexing, preprocessing, and parsing the IDL
/// file at `path`. That pipeline is an explicit non-goal of this crate (see
/// the purpose-and-scope notes); callers that have their own parsed AST
/// should build a `Model` directly with `zonegen_model::ModelBuilder`
/// instead of calling this.
pub fn parse_idl(path: &Path) -> Result<Model, CliError> {
    Err(CliError::UnknownParse(format!(
        "{} was not compiled: this build carries no textual IDL parser",
        path.display()
    )))
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;
    use zonegen_model::ModelBuilder;

    fn options_for(dir: &std::path::Path, idl: &std::path::Path) -> CompileOptions {
        let cli = crate::cli::Cli::parse_from([
            "zonegen",
            "-i",
            idl.to_str().unwrap(),
            "-p",
            dir.to_str().unwrap(),
            "-h",
            "a.h",
            "-x",
            "a_proxy.cpp",
            "-s",
            "a_stub.cpp",
        ]);
        CompileOptions::from_cli(&cli)
    }

    #[test]
    fn missing_idl_returns_argument_error_code() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path(), &dir.path().join("missing.idl"));
        let model = ModelBuilder::new().build();
        assert_eq!(run(&model, &options), exit_code::ARGUMENT_OR_IDL_ERROR);
    }

    #[test]
    fn successful_compile_writes_every_file_in_the_layout() {
        let dir = tempdir().unwrap();
        let idl = dir.path().join("a.idl");
        fs::write(&idl, "interface Foo {};").unwrap();
        let options = options_for(dir.path(), &idl);

        let mut builder = ModelBuilder::new();
        let root = builder.root();
        builder.interface(root, "Foo");
        let model = builder.build();

        assert_eq!(run(&model, &options), exit_code::SUCCESS);
        assert!(options.layout.header.exists());
        assert!(options.layout.proxy.exists());
        assert!(options.layout.stub.exists());
        assert!(options.layout.stub_header.exists());
        let header = fs::read_to_string(&options.layout.header).unwrap();
        assert!(header.contains("class Foo"));
    }

    #[test]
    fn classifier_rejection_writes_no_files_and_returns_fatal_code() {
        let dir = tempdir().unwrap();
        let idl = dir.path().join("a.idl");
        fs::write(&idl, "interface Foo { int bad([const, out] int*& x); };").unwrap();
        let options = options_for(dir.path(), &idl);

        let mut builder = ModelBuilder::new();
        let root = builder.root();
        let foo = builder.interface(root, "Foo");
        let method = builder.method(foo, "bad", "int");
        builder.add_param(method, "int*&", "x", &["const", "out"]);
        let model = builder.build();

        assert_eq!(run(&model, &options), exit_code::FATAL);
        assert!(!options.layout.proxy.exists());
    }
}
