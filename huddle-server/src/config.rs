use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 6060;
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// What the registry does when a channel closes without `leave-room`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisconnectPolicy {
    /// Drop the subscriptions and tell the rest of each room the peer left.
    #[default]
    Announce,
    /// Drop the subscriptions without telling anyone.
    Silent,
}

impl FromStr for DisconnectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "announce" => Ok(Self::Announce),
            "silent" => Ok(Self::Silent),
            other => Err(format!(
                "unknown disconnect policy '{}' (expected 'announce' or 'silent')",
                other
            )),
        }
    }
}

impl fmt::Display for DisconnectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Announce => write!(f, "announce"),
            Self::Silent => write!(f, "silent"),
        }
    }
}

/// Liveness probing for event channel connections.
#[derive(Debug, Clone, Copy)]
pub struct HeartbeatConfig {
    /// How often the relay pings each socket.
    pub interval: Duration,
    /// A socket that sent nothing (not even a pong) for this long is evicted.
    pub idle_timeout: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_HEARTBEAT_INTERVAL,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Browser origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub heartbeat: HeartbeatConfig,
    pub disconnect_policy: DisconnectPolicy,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
            heartbeat: HeartbeatConfig::default(),
            disconnect_policy: DisconnectPolicy::default(),
        }
    }
}
