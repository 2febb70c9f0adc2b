use checkcache_core::events;
use checkcache_core::init_logging;

mod app;
mod commands;

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v/--verbose: stdout belongs to the plugin line
    let verbose = matches.get_flag("verbose");
    init_logging(!verbose);

    let exit_code = match commands::run_command(&matches) {
        Ok(code) => code,
        Err(e) => {
            events::log_app_error(e.as_ref());
            eprintln!("Error: {}", e);
            commands::UNKNOWN_EXIT_CODE
        }
    };

    std::process::exit(exit_code);
}
