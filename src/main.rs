use std::process::ExitCode;

fn main() -> ExitCode {
    match tariff_gdp::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("An error occurred: {err}");
            ExitCode::FAILURE
        }
    }
}
