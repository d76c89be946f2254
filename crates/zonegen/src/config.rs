//! Resolved compile configuration. Every phase takes a `&CompileOptions`
//! instead of reaching into shared mutable state.

use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Generated-file layout, computed once from [`CompileOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub header: PathBuf,
    pub proxy: PathBuf,
    pub proxy_header: PathBuf,
    pub stub: PathBuf,
    pub stub_header: PathBuf,
    /// Resolved path for the `-m`/`--mock` gmock header. Computed here so the
    /// flag parses and validates like every other output path, but no phase
    /// writes to it yet — generating the actual gmock class is out of scope
    /// for this build (see `driver::compile_and_write`).
    pub mock: Option<PathBuf>,
}

impl OutputLayout {
    pub fn from_cli(cli: &Cli) -> Self {
        let include_dir = cli.output_path.join("include");
        let src_dir = cli.output_path.join("src");
        Self {
            header: include_dir.join(&cli.header),
            proxy: src_dir.join(&cli.proxy),
            proxy_header: src_dir.join(cli.proxy_header_path()),
            stub: src_dir.join(&cli.stub),
            stub_header: src_dir.join(cli.stub_header_path()),
            mock: cli.mock.as_ref().map(|m| include_dir.join(m)),
        }
    }
}

/// Everything downstream of CLI parsing needs to compile one IDL file.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub idl: PathBuf,
    pub include_paths: Vec<PathBuf>,
    pub defines: Vec<String>,
    pub namespaces: Vec<String>,
    pub module_name: String,
    pub dump_preprocessor_output_and_die: bool,
    pub layout: OutputLayout,
}

impl CompileOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            idl: cli.idl.clone(),
            include_paths: cli.path.clone(),
            defines: cli.defines_with_generator(),
            namespaces: cli.namespace.clone(),
            module_name: cli.module_name.clone(),
            dump_preprocessor_output_and_die: cli.dump_preprocessor_output_and_die,
            layout: OutputLayout::from_cli(cli),
        }
    }

    pub fn idl_exists(&self) -> bool {
        Path::new(&self.idl).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn layout_places_files_under_include_and_src() {
        let cli = Cli::parse_from([
            "zonegen", "-i", "a.idl", "-p", "out", "-h", "a.h", "-x", "a_proxy.cpp", "-s", "a_stub.cpp",
        ]);
        let options = CompileOptions::from_cli(&cli);
        assert_eq!(options.layout.header, PathBuf::from("out/include/a.h"));
        assert_eq!(options.layout.proxy, PathBuf::from("out/src/a_proxy.cpp"));
        assert_eq!(options.layout.proxy_header, PathBuf::from("out/src/a_proxy.cpp.h"));
        assert_eq!(options.layout.mock, None);
    }
}
