use clap::ArgMatches;

use checkcache_core::check_ops;

use super::helpers::{cache_path, load_config};

pub(crate) fn handle_show_command(
    matches: &ArgMatches,
) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config()?;
    let cache_path = cache_path(&config, matches)?;

    match check_ops::read_cache(&cache_path) {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(0)
        }
        None => {
            println!("No cached result at {}", cache_path.display());
            Ok(1)
        }
    }
}
