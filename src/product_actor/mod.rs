//! Product storage: the `Entity` rules for products and the actor that owns them.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::domain::Product;
use uuid::Uuid;

/// Creates a new Product actor and its client.
///
/// Ids are random 128-bit UUIDs rather than a counter.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let next_product_id = || Uuid::new_v4().to_string();

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_product_id);
    let client = ProductClient::new(generic_client);

    (actor, client)
}
