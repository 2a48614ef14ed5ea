use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use quadboard_store::StoreConfig;

#[derive(Debug, Parser)]
#[command(name = "quadboard-server", about = "Quadboard sticky-note API server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "QUADBOARD_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long, env = "QUADBOARD_PORT", default_value = "8081")]
    pub port: u16,

    /// JSON file holding all notes; created as `[]` if missing
    #[arg(long, env = "QUADBOARD_NOTES_FILE", default_value = "notes.json")]
    pub notes_file: PathBuf,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            notes_file: Some(self.notes_file.clone()),
        }
    }
}
