//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `carnet_core` linkage.
//! - Allow one-shot local dispatch against a data directory for quick
//!   manual checks.

use carnet_core::CommandDispatcher;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            println!("carnet_core version={}", carnet_core::core_version());
            ExitCode::SUCCESS
        }
        [data_dir, user_id, message] => {
            let dispatcher = CommandDispatcher::new(data_dir.as_str());
            println!("{}", dispatcher.respond(message, user_id, &[]));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("usage: carnet_cli [<data_dir> <user_id> <message>]");
            ExitCode::FAILURE
        }
    }
}
