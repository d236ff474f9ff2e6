//! filestat-send - Uploads files to a filestat server
//!
//! Sends every file named on the command line over one connection and
//! prints the server's report.

use filestat::client::Sender;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Client configuration
struct Config {
    /// Server host
    host: String,
    /// Server port
    port: u16,
    /// Files to upload
    files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: filestat::DEFAULT_PORT,
            files: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    if i + 1 < args.len() {
                        config.host = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Error: --host requires a value");
                        std::process::exit(1);
                    }
                }
                "--port" | "-p" => {
                    if i + 1 < args.len() {
                        config.port = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid port number");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --port requires a value");
                        std::process::exit(1);
                    }
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                file => {
                    config.files.push(PathBuf::from(file));
                    i += 1;
                }
            }
        }

        if config.files.is_empty() {
            eprintln!("Error: no files given");
            print_help();
            std::process::exit(1);
        }

        config
    }
}

fn print_help() {
    println!(
        r#"
filestat-send - Upload files to a filestat server

USAGE:
    filestat-send [OPTIONS] <FILE>...

OPTIONS:
    -h, --host <HOST>    Server host (default: 127.0.0.1)
    -p, --port <PORT>    Server port (default: 9000)
        --help           Print this help message
"#
    );
}

/// `RUST_LOG` if set, INFO otherwise
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    FmtSubscriber::builder()
        .with_env_filter(default_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let sender = Sender::new(config.host, config.port);
    let report = sender.send_files(&config.files).await?;

    println!("Server response:\n{}", report);
    Ok(())
}
