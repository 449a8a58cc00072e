use std::process::ExitCode;

use hypermark_validator::cli::{self, EXIT_LOAD_ERROR};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_LOAD_ERROR)
        }
    }
}
