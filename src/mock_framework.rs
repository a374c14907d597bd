//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_update`] to assert behavior.

use crate::actor_framework::{Entity, Response, ResourceClient, ResourceRequest};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// No `ResourceActor` is started: the test plays the actor, inspecting each
/// message on `receiver` and answering it through its responder.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreatePayload, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Response<bool>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Search request
pub async fn expect_search<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(String, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Search { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::clients::ProductClient;
    use crate::domain::{Product, ProductCreate, ProductPatch};
    use crate::product_actor::ProductError;

    fn phone(id: &str) -> Product {
        Product {
            id: id.into(),
            name: "Phone".into(),
            description: "Smartphone".into(),
            price: 499.99,
            category: "Electronics".into(),
        }
    }

    #[tokio::test]
    async fn test_create_is_forwarded_unchanged() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let create_task = tokio::spawn(async move {
            client.create(ProductCreate {
                name: "Phone".into(),
                description: "Smartphone".into(),
                price: 499.99,
                category: "Electronics".into(),
            }).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Phone");
        assert_eq!(payload.price, 499.99);
        responder.send(Ok(phone("p1"))).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok(phone("p1")));
    }

    #[tokio::test]
    async fn test_not_found_values_pass_through() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move {
            let got = client.get_by_id("nope".into()).await;
            let updated = client.update("nope".into(), ProductPatch::default()).await;
            let deleted = client.delete("nope".into()).await;
            (got, updated, deleted)
        });

        let (id, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        assert_eq!(id, "nope");
        responder.send(Ok(None)).unwrap();

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, "nope");
        assert!(patch.is_empty());
        responder.send(Ok(None)).unwrap();

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        assert_eq!(id, "nope");
        responder.send(Ok(false)).unwrap();

        assert_eq!(task.await.unwrap(), (Ok(None), Ok(None), Ok(false)));
    }

    #[tokio::test]
    async fn test_list_and_search_are_forwarded() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move {
            let all = client.list_all().await;
            let found = client.search_by_text("Elect".into()).await;
            (all, found)
        });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Ok(vec![phone("p1"), phone("p2")])).unwrap();

        let (query, responder) = expect_search(&mut receiver).await.expect("Expected Search request");
        assert_eq!(query, "Elect");
        responder.send(Ok(vec![phone("p2")])).unwrap();

        let (all, found) = task.await.unwrap();
        assert_eq!(all.unwrap().len(), 2);
        assert_eq!(found, Ok(vec![phone("p2")]));
    }

    #[tokio::test]
    async fn test_store_errors_are_mapped() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move {
            client.update("p1".into(), ProductPatch { price: Some(-1.0), ..Default::default() }).await
        });

        let (_, _, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        responder.send(Err(FrameworkError::Rejected("price must be a non-negative number".into()))).unwrap();

        assert!(matches!(task.await.unwrap(), Err(ProductError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.list_all().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        drop(responder);

        assert!(matches!(task.await.unwrap(), Err(ProductError::ActorCommunicationError(_))));
    }
}
