use std::process::ExitCode;

use formula_runner::cli;
use formula_runner::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::from(cli::exit_code(&e))
        }
    }
}
