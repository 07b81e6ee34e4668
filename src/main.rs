// SPDX-License-Identifier: MPL-2.0
use json_toolkit_i18n::cli::{self, Flags};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let flags = match Flags::from_env() {
        Ok(flags) => flags,
        Err(error) => {
            eprintln!("{}\n\n{}", error, cli::HELP);
            return ExitCode::from(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match cli::run(&flags, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
