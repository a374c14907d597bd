use tracing::{debug, instrument};
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::ProductError;
use crate::actor_framework::ResourceClient;

/// Catalog facade over the Product actor.
///
/// Every method forwards to exactly one store request and passes the result
/// back unchanged. No validation happens here; callers hand in checked
/// payloads.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: String) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn create(&self, payload: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(payload).await?)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: String, patch: ProductPatch) -> Result<Option<Product>, ProductError> {
        if patch.is_empty() {
            debug!("Empty patch, record will be returned unchanged");
        }
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: String) -> Result<bool, ProductError> {
        debug!("Sending request");
        Ok(self.inner.delete(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn search_by_text(&self, query: String) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.search(query).await?)
    }
}
