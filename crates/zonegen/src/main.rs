use clap::Parser;
use zonegen::cli::Cli;
use zonegen::config::CompileOptions;
use zonegen::driver;

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal is a standard POSIX function; this only changes
    // signal disposition, no memory safety concerns.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn main() {
    reset_sigpipe();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // try_parse rather than parse: a malformed invocation is an argument
    // error per the external-interfaces exit code table, not clap's usual
    // exit(2) convention.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.exit_code() == 0 => {
            // --help / --version: clap's own success paths, not argument errors.
            print!("{e}");
            std::process::exit(driver::exit_code::SUCCESS);
        }
        Err(e) => {
            eprint!("{e}");
            std::process::exit(driver::exit_code::ARGUMENT_OR_IDL_ERROR);
        }
    };
    let options = CompileOptions::from_cli(&cli);

    if options.dump_preprocessor_output_and_die {
        match std::fs::read_to_string(&options.idl) {
            Ok(text) => {
                print!("{text}");
                std::process::exit(driver::exit_code::SUCCESS);
            }
            Err(_) => std::process::exit(driver::exit_code::ARGUMENT_OR_IDL_ERROR),
        }
    }

    let model = match driver::parse_idl(&options.idl) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(driver::exit_code::FATAL);
        }
    };

    std::process::exit(driver::run(&model, &options));
}
