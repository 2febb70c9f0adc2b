use clap::ArgMatches;
use tracing::info;

use checkcache_core::{CheckStatus, check_ops};

use super::helpers::{cache_path, command_arg, load_config, timeout};

pub(crate) fn handle_refresh_command(
    matches: &ArgMatches,
) -> Result<i32, Box<dyn std::error::Error>> {
    let command = command_arg(matches).ok_or("Command argument is required")?;
    let config = load_config()?;
    let cache_path = cache_path(&config, matches)?;
    let timeout = timeout(&config, matches);

    if !matches.get_flag("foreground") {
        check_ops::refresh_detached(command, timeout, &cache_path, 0)?;
        return Ok(0);
    }

    let outcome = check_ops::refresh_attached(command, timeout, &cache_path)?;
    if !outcome.persisted {
        eprintln!(
            "Warning: result could not be written to {}",
            cache_path.display()
        );
    }

    let status = outcome
        .record
        .cached_status()
        .unwrap_or(CheckStatus::Unknown);
    println!("{}: {}", status, outcome.record.cached_message());

    info!(
        event = "cli.refresh_completed",
        file = %cache_path.display(),
        status = %status
    );

    Ok(status.code())
}
