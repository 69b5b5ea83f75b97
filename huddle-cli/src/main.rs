use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use huddle::RoomId;
use huddle::server::{
    DEFAULT_PORT, DisconnectPolicy, HeartbeatConfig, ServerConfig, run as run_relay,
};
use std::net::IpAddr;
use std::time::Duration;

const DEFAULT_LOG_FILTER: &str = "huddle=info,huddle_server=info";

#[derive(Parser)]
#[command(name = "huddle", about = "Signaling relay for two-party video rooms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay.
    Serve(ServeArgs),
    /// Print a fresh room token.
    RoomId,
}

#[derive(clap::Args)]
struct ServeArgs {
    #[arg(long, env = "HUDDLE_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Comma-separated browser origins. Empty allows any origin.
    #[arg(long, env = "HUDDLE_ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Seconds between pings sent to each connection.
    #[arg(long, env = "HUDDLE_HEARTBEAT_SECS", default_value_t = 25)]
    heartbeat_secs: u64,

    /// Seconds of silence after which a connection is evicted.
    #[arg(long, env = "HUDDLE_IDLE_TIMEOUT_SECS", default_value_t = 60)]
    idle_timeout_secs: u64,

    /// `announce` or `silent`.
    #[arg(long, env = "HUDDLE_DISCONNECT_POLICY", default_value_t = DisconnectPolicy::Announce)]
    disconnect_policy: DisconnectPolicy,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            allowed_origins: self
                .allowed_origins
                .into_iter()
                .map(|origin| origin.trim().to_owned())
                .filter(|origin| !origin.is_empty())
                .collect(),
            heartbeat: HeartbeatConfig {
                interval: Duration::from_secs(self.heartbeat_secs),
                idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            },
            disconnect_policy: self.disconnect_policy,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            init_tracing();
            let config = args.into_config();

            println!(
                "{} {}",
                "Huddle relay".green().bold(),
                format!("http://{}", config.socket_addr()).cyan()
            );
            if config.allowed_origins.is_empty() {
                println!("   CORS: {}", "any origin".yellow());
            } else {
                println!("   CORS: {}", config.allowed_origins.join(", "));
            }
            println!("   Disconnect policy: {}", config.disconnect_policy);

            run_relay(config).await
        }
        Commands::RoomId => {
            println!("{}", RoomId::generate());
            Ok(())
        }
    }
}
