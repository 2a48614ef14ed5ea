pub mod config;
mod routes;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use std::sync::Arc;

use anyhow::Result;
use quadboard_service::LocalService;
use quadboard_store::NoteStore;
use tokio::net::TcpListener;
use tracing::info;

pub use config::ServerConfig;

pub async fn serve(listener: TcpListener, store: Arc<dyn NoteStore>) -> Result<()> {
    let service = LocalService::new(store);
    let app = routes::build_router(service);
    if let Ok(addr) = listener.local_addr() {
        info!("quadboard-server listening on http://{addr}");
    }
    axum::serve(listener, app).await?;
    Ok(())
}
