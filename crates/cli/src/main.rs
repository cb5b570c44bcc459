use std::process::ExitCode;

fn main() -> ExitCode {
    printmarket_cli::run()
}
