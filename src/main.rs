//! Binary entrypoint that launches the prompt optimizer server.

use std::process::ExitCode;

use prompt_optimizer::start_prompt_optimizer;

/// Load configuration from the environment and serve until Ctrl-C.
fn main() -> ExitCode {
    start_prompt_optimizer::run()
}
