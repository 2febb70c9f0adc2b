use clap::{Arg, ArgAction, Command, value_parser};
use clap_complete::Shell;

fn command_arg(required: bool) -> Arg {
    Arg::new("command")
        .short('c')
        .long("command")
        .help("Check command to run, passed to /bin/sh -c")
        .allow_hyphen_values(true)
        .required(required)
}

fn name_arg() -> Arg {
    Arg::new("name")
        .short('n')
        .long("name")
        .help("Cache file name inside the cache directory (default: derived from the command)")
}

fn timeout_arg() -> Arg {
    Arg::new("timeout")
        .short('t')
        .long("timeout")
        .help("Seconds before the check command is killed (overrides config)")
        .value_parser(value_parser!(u64).range(1..))
}

pub fn build_cli() -> Command {
    Command::new("checkcache")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve monitoring check results from a cache and refresh them in the background")
        .long_about("checkcache wraps slow Nagios/Icinga check commands. Each poll is answered immediately from the last cached result; the real command is re-run in a detached background process once the cached result is old enough, so the poll never waits for it.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output (JSON on stderr)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Report the cached result and refresh it in the background when due")
                .arg(command_arg(true))
                .arg(name_arg())
                .arg(
                    Arg::new("expire")
                        .short('e')
                        .long("expire")
                        .help("Seconds after which a cached result is CRITICAL (overrides config)")
                        .value_parser(value_parser!(i64).range(0..))
                )
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .help("Minimum seconds between refreshes, negative to refresh on every poll (overrides config)")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                )
                .arg(timeout_arg())
        )
        .subcommand(
            Command::new("refresh")
                .about("Re-run the check command now and store its result")
                .arg(command_arg(true))
                .arg(name_arg())
                .arg(timeout_arg())
                .arg(
                    Arg::new("foreground")
                        .long("foreground")
                        .help("Wait for the command instead of detaching, and exit with its status")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("show")
                .about("Print the cached record as JSON")
                .arg(command_arg(false))
                .arg(name_arg())
                .group(
                    clap::ArgGroup::new("target")
                        .args(["command", "name"])
                        .required(true)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(Shell))
                )
        )
}
