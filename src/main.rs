//! filestat - A TCP File Analysis Service
//!
//! This is the main entry point for the filestat server.
//! It sets up logging, the storage directory and the TCP listener.

use filestat::config::ServerConfig;
use filestat::server::Listener;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Parse configuration from command-line arguments
fn config_from_args() -> ServerConfig {
    let mut config = ServerConfig::default();
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" | "-h" => {
                config.host = value_for(&args, i, "--host").to_string();
                i += 2;
            }
            "--port" | "-p" => {
                config.port = value_for(&args, i, "--port").parse().unwrap_or_else(|_| {
                    eprintln!("Error: invalid port number");
                    std::process::exit(1);
                });
                i += 2;
            }
            "--dir" | "-d" => {
                config.storage_dir = PathBuf::from(value_for(&args, i, "--dir"));
                i += 2;
            }
            "--max-file-size" => {
                config.limits.max_file_size = value_for(&args, i, "--max-file-size")
                    .parse()
                    .ok()
                    .filter(|&size: &usize| size > 0 && size <= i32::MAX as usize)
                    .unwrap_or_else(|| {
                        eprintln!("Error: invalid file size");
                        std::process::exit(1);
                    });
                i += 2;
            }
            "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--version" | "-v" => {
                println!("filestat version {}", filestat::VERSION);
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    config
}

/// Returns the value following the flag at `i`, or exits.
fn value_for<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        r#"
filestat - A TCP File Analysis Service

USAGE:
    filestat [OPTIONS]

OPTIONS:
    -h, --host <HOST>          Host to bind to (default: 0.0.0.0)
    -p, --port <PORT>          Port to listen on (default: 9000)
    -d, --dir <DIR>            Storage directory (default: ./storage)
        --max-file-size <N>    Largest accepted upload in bytes (default: 104857600)
    -v, --version              Print version information
        --help                 Print this help message

EXAMPLES:
    filestat                         # Start on 0.0.0.0:9000
    filestat --port 9100             # Start on port 9100
    filestat --dir /var/lib/uploads  # Store uploads elsewhere

SENDING FILES:
    $ filestat-send notes.txt report.md
"#
    );
}

/// `RUST_LOG` if set, INFO otherwise
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let config = config_from_args();

    // Set up logging
    FmtSubscriber::builder()
        .with_env_filter(default_filter())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    info!("filestat v{} starting", filestat::VERSION);

    // Create the storage directory, open the log and bind
    let listener = Listener::bind(&config).await?;
    info!("Listening on {}", config.bind_address());

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    listener.run_until(shutdown).await;

    info!("Server shutdown complete");
    Ok(())
}
