use clap::ArgMatches;
use tracing::{error, info};

use checkcache_core::check_ops;

use super::UNKNOWN_EXIT_CODE;
use super::helpers::{cache_path, command_arg, interval, load_config, timeout};

pub(crate) fn handle_check_command(
    matches: &ArgMatches,
) -> Result<i32, Box<dyn std::error::Error>> {
    let command = command_arg(matches).ok_or("Command argument is required")?;

    // Anything that stops us from consulting the cache is a plugin UNKNOWN.
    let (config, cache_path) = match load_config()
        .and_then(|config| cache_path(&config, matches).map(|path| (config, path)))
    {
        Ok(resolved) => resolved,
        Err(e) => {
            println!("UNKNOWN: {}", e);
            return Ok(UNKNOWN_EXIT_CODE);
        }
    };

    let expire = matches
        .get_one::<i64>("expire")
        .copied()
        .unwrap_or_else(|| config.check.expire());
    let interval = interval(&config, matches);
    let timeout = timeout(&config, matches);

    let decision = check_ops::check_cache(&cache_path, expire, interval);
    println!("{}", decision.plugin_line());

    let exit_code = decision.status.code();

    info!(
        event = "cli.check_completed",
        status = %decision.status,
        should_refresh = decision.should_refresh
    );

    if decision.should_refresh {
        // The foreground process exits with `exit_code` inside this call;
        // only the detached child (or a failed detach) gets past it.
        if let Err(e) = check_ops::refresh_detached(command, timeout, &cache_path, exit_code) {
            error!(
                event = "cli.check.refresh_failed",
                file = %cache_path.display(),
                error = %e
            );
        }
    }

    Ok(exit_code)
}
