//! Client handles: the stable interface the transport layer calls.

pub mod product_client;

pub use product_client::ProductClient;
