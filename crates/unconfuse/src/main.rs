mod cli;

use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so filter mode output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(cli::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let code = cli::run(std::env::args().skip(1));
    std::process::exit(code);
}
