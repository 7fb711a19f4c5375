use cleanlinks_core::is_valid_url;
use std::process::ExitCode;

pub fn run_validate(text: &str) -> ExitCode {
    if is_valid_url(text) {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::FAILURE
    }
}
