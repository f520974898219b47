//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use env_logger::{Builder, Env};

fn main() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    match freight_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors with its own exit codes.
        Err(freight_cli::CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("freight: {err}");
            std::process::exit(1);
        }
    }
}
