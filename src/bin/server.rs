//! Private messaging server with live presence.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin naisho-server -- --port 5000
//! ```

use clap::Parser;

use naisho::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "naisho-server", about = "Private messaging server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(&args.log_level);

    // Run the server
    if let Err(e) = naisho::run(&args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
