use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use dogtown::{config, server};

/// Multiplayer dog world server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the map configuration file
    config: PathBuf,

    /// Directory with static web content
    www_root: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize logger
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args = Args::parse();

    let game = match config::load_game(&args.config) {
        Ok(game) => Arc::new(game),
        Err(err) => {
            log::error!("Failed to load {}: {}", args.config.display(), err);
            process::exit(1);
        }
    };
    log::info!(
        "Dogtown server v{} loaded {} maps",
        dogtown::VERSION,
        game.maps().len()
    );

    let addr = SocketAddr::new(args.host, args.port);
    let app = server::app(game, &args.www_root);
    if let Err(err) = server::run(app, addr).await {
        log::error!("Server error: {}", err);
        process::exit(1);
    }
    log::info!("Server has exited");
}
