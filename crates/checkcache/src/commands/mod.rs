use clap::ArgMatches;
use tracing::error;

use checkcache_core::events;

pub mod helpers;

mod check;
mod completions;
mod refresh;
mod show;

/// Exit code used when checkcache itself cannot produce a result.
pub const UNKNOWN_EXIT_CODE: i32 = 3;

/// Run the selected subcommand and return the process exit code.
pub fn run_command(matches: &ArgMatches) -> Result<i32, Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("check", sub_matches)) => check::handle_check_command(sub_matches),
        Some(("refresh", sub_matches)) => refresh::handle_refresh_command(sub_matches),
        Some(("show", sub_matches)) => show::handle_show_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
