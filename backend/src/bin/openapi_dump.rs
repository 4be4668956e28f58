//! Print the OpenAPI document as JSON.

use std::io::Write;
use std::process::ExitCode;

use credx_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    let json = match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => json,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "failed to serialise OpenAPI document: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut stdout = std::io::stdout().lock();
    match writeln!(stdout, "{json}") {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
