use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::sync::Arc;
use std::time::Duration;

use tether_client::{NegotiationSession, SessionConfig, StaticMediaEndpoint};
use tether_core::VideoTransform;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Negotiate one WebRTC media session against a non-trickle signaling server")]
struct Cli {
    /// Base URL of the signaling server, e.g. http://localhost:8080
    #[arg(long)]
    server: String,

    /// Video transform tag requested from the peer (none, edges, cartoon, rotate)
    #[arg(long, default_value = "none")]
    transform: VideoTransform,

    /// STUN/TURN server url; repeat the flag for more than one
    #[arg(long = "ice-server")]
    ice_servers: Vec<String>,

    /// Give up if ICE gathering takes longer than this many milliseconds
    #[arg(long)]
    gathering_timeout_ms: Option<u64>,

    /// Reject signaling replies whose description type is unrecognized
    #[arg(long)]
    strict_types: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = SessionConfig::new(cli.server.clone());
    config.ice_servers = cli.ice_servers.clone();
    config.reject_unknown_kinds = cli.strict_types;
    if let Some(ms) = cli.gathering_timeout_ms {
        config = config.with_gathering_timeout(Duration::from_millis(ms));
    }

    println!("{}", "🔌 Dialing signaling server...".cyan());

    let media = Arc::new(StaticMediaEndpoint::new(cli.transform));
    let mut session = NegotiationSession::connect(config, media)
        .await
        .context("Failed to create peer connection")?;

    session
        .start_as_initiator()
        .await
        .context("Negotiation failed")?;

    println!(
        "{}",
        format!("✨ Session {} connected", session.id())
            .green()
            .bold()
    );
    println!("   📡 Server:    {}", cli.server);
    println!("   🎨 Transform: {}", cli.transform);
    println!("{}", "Press Ctrl-C to hang up.".cyan());

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    session.close().await.context("Failed to close session")?;
    println!("{}", "👋 Session closed".green());

    Ok(())
}
