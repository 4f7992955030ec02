use clap::Parser;
use todo::cli::commands::Cli;
use todo::cli::handlers;
use todo::io::store_io::StoreError;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        let code = e
            .downcast_ref::<StoreError>()
            .map_or(1, StoreError::exit_code);
        std::process::exit(code);
    }
}

/// Diagnostics go to stderr, filtered by TODO_LOG (default: warnings only)
fn init_logging() {
    let filter = EnvFilter::try_from_env("TODO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
