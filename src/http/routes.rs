use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::clients::ProductClient;
use crate::domain::{Product, ProductCreate, ProductPatch};

use super::dto::{CreateProductRequest, UpdateProductRequest};
use super::error::{ApiError, ApiResult};

/// Product routes, nested under `/products`.
pub fn router() -> Router<ProductClient> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub async fn list_products(State(products): State<ProductClient>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(products.list_all().await?))
}

pub async fn search_products(
    State(products): State<ProductClient>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let query = params.query.unwrap_or_default();
    Ok(Json(products.search_by_text(query).await?))
}

pub async fn get_product(
    State(products): State<ProductClient>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    products.get_by_id(id).await?.map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_product(
    State(products): State<ProductClient>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload = ProductCreate::from(CreateProductRequest::from_body(&body)?);
    let created = products.create(payload).await?;
    info!(product_id = %created.id, "Product created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product(
    State(products): State<ProductClient>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Product>> {
    let patch = ProductPatch::from(UpdateProductRequest::from_body(&body)?);
    products.update(id, patch).await?.map(Json).ok_or(ApiError::NotFound)
}

pub async fn delete_product(
    State(products): State<ProductClient>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if products.delete(id.clone()).await? {
        info!(product_id = %id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
