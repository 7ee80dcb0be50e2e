use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = ergo_shutdown::cli::Cli::parse();
    ergo_shutdown::util::logging::init(cli.verbose);

    match cli.run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
