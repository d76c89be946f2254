//! Command-line surface: one flat flag set, no subcommands, since this
//! binary has a single mode rather than a subcommand tree.

use std::path::PathBuf;

use clap::Parser;

/// Cross-zone RPC IDL compiler.
#[derive(Parser, Debug)]
#[command(name = "zonegen", version, about, disable_version_flag = false)]
pub struct Cli {
    /// Root IDL file to compile.
    #[arg(short = 'i', long = "idl")]
    pub idl: PathBuf,

    /// Base output directory.
    #[arg(short = 'p', long = "output_path")]
    pub output_path: PathBuf,

    /// Public header filename, placed under `<output>/include/`.
    #[arg(short = 'h', long = "header")]
    pub header: PathBuf,

    /// Proxy source filename under `<output>/src/`.
    #[arg(short = 'x', long = "proxy")]
    pub proxy: PathBuf,

    /// Proxy header filename; defaults to `<proxy>.h`.
    #[arg(short = 'y', long = "proxy_header")]
    pub proxy_header: Option<PathBuf>,

    /// Stub source filename.
    #[arg(short = 's', long = "stub")]
    pub stub: PathBuf,

    /// Stub header filename; defaults to `<stub>.h`.
    #[arg(short = 't', long = "stub_header")]
    pub stub_header: Option<PathBuf>,

    /// Optional mock header output.
    #[arg(short = 'm', long = "mock")]
    pub mock: Option<PathBuf>,

    /// Used in the generated `<module>_register_stubs` symbol.
    #[arg(short = 'M', long = "module_name", default_value = "rpc")]
    pub module_name: String,

    /// IDL include search path, repeatable.
    #[arg(long = "path")]
    pub path: Vec<PathBuf>,

    /// Namespace to wrap generated declarations in, outer to inner, repeatable.
    #[arg(short = 'n', long = "namespace")]
    pub namespace: Vec<String>,

    /// Print preprocessed IDL and exit 0.
    #[arg(short = 'd', long = "dump_preprocessor_output_and_die")]
    pub dump_preprocessor_output_and_die: bool,

    /// Preprocessor macro definition `NAME[=VALUE]`, repeatable. `GENERATOR=1`
    /// is always injected in addition to these.
    #[arg(short = 'D')]
    pub define: Vec<String>,
}

impl Cli {
    /// The resolved proxy-header filename, applying the `<proxy>.h` default.
    pub fn proxy_header_path(&self) -> PathBuf {
        self.proxy_header.clone().unwrap_or_else(|| default_header_for(&self.proxy))
    }

    /// The resolved stub-header filename, applying the `<stub>.h` default.
    pub fn stub_header_path(&self) -> PathBuf {
        self.stub_header.clone().unwrap_or_else(|| default_header_for(&self.stub))
    }

    /// Macro defines including the always-injected `GENERATOR=1`.
    pub fn defines_with_generator(&self) -> Vec<String> {
        let mut defines = self.define.clone();
        defines.push("GENERATOR=1".to_string());
        defines
    }
}

fn default_header_for(source: &std::path::Path) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(".h");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_header_defaults_to_proxy_dot_h() {
        let cli = Cli::parse_from([
            "zonegen", "-i", "a.idl", "-p", "out", "-h", "a.h", "-x", "a_proxy.cpp", "-s", "a_stub.cpp",
        ]);
        assert_eq!(cli.proxy_header_path(), PathBuf::from("a_proxy.cpp.h"));
        assert_eq!(cli.stub_header_path(), PathBuf::from("a_stub.cpp.h"));
    }

    #[test]
    fn generator_define_is_always_injected() {
        let cli = Cli::parse_from([
            "zonegen", "-i", "a.idl", "-p", "out", "-h", "a.h", "-x", "a_proxy.cpp", "-s", "a_stub.cpp", "-D",
            "FOO=1",
        ]);
        let defines = cli.defines_with_generator();
        assert!(defines.contains(&"FOO=1".to_string()));
        assert!(defines.contains(&"GENERATOR=1".to_string()));
    }

    #[test]
    fn namespace_and_path_are_repeatable() {
        let cli = Cli::parse_from([
            "zonegen", "-i", "a.idl", "-p", "out", "-h", "a.h", "-x", "a_proxy.cpp", "-s", "a_stub.cpp", "-n",
            "outer", "-n", "inner", "--path", "/usr/include", "--path", "/opt/include",
        ]);
        assert_eq!(cli.namespace, vec!["outer".to_string(), "inner".to_string()]);
        assert_eq!(cli.path.len(), 2);
    }
}
