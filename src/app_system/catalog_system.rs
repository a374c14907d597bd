use tracing::{info, error};
use crate::clients::ProductClient;
use crate::product_actor;

use super::error::AppError;

/// The main application system that owns the catalog store actor.
///
/// Responsible for starting the actor, handing out its client, and handling shutdown.
pub struct CatalogSystem {
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    pub fn new(buffer_size: usize) -> Self {
        let (product_actor, product_client) = product_actor::new(buffer_size);
        let product_handle = tokio::spawn(product_actor.run());

        info!(buffer_size, "Catalog store started");

        Self {
            product_client,
            handles: vec![product_handle],
        }
    }

    /// Drops this system's client and waits for the actor to finish.
    ///
    /// The actor only stops once every clone of the client is gone, so any
    /// router holding one must be dropped first.
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down system...");
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(AppError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
