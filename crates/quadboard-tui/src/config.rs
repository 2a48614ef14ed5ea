use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 8081;

#[derive(Debug, Parser)]
#[command(name = "quadboard", about = "Sticky notes on a four-quadrant board")]
pub struct ClientConfig {
    /// Server to talk to. When omitted, a local quadboard-server is started.
    #[arg(long, env = "QUADBOARD_SERVER_URL")]
    pub server: Option<String>,

    /// Port for the locally started server
    #[arg(long, env = "QUADBOARD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log output goes here; the terminal belongs to the board
    #[arg(long, env = "QUADBOARD_LOG_FILE", default_value = "quadboard.log")]
    pub log_file: PathBuf,
}

impl ClientConfig {
    pub fn server_url(&self) -> String {
        match &self.server {
            Some(url) => url.clone(),
            None => format!("http://127.0.0.1:{}", self.port),
        }
    }

    /// Whether the client should start its own server.
    pub fn spawns_server(&self) -> bool {
        self.server.is_none()
    }
}
