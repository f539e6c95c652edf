mod cli;
mod jq_exec;

use colored::Colorize;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    // a logger may already be installed when embedded; keep going either way
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .try_init();
}

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    init_logging(command_line_interface.verbose);
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
