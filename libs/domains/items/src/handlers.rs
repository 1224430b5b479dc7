use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    ApiError, handle_errors, panic_response,
    errors::{
        messages,
        responses::{
            BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
            UnprocessableEntityResponse,
        },
    },
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use utoipa::OpenApi;

use crate::api::{ApiItem, BulkActiveRequest, BulkActiveResponse, IdQuery};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_item,
        get_item,
        update_item,
        delete_item,
        list_items,
        bulk_update_active,
    ),
    components(
        schemas(ApiItem, BulkActiveRequest, BulkActiveResponse),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            UnprocessableEntityResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
///
/// Routes are wrapped by the panic catcher and the error middleware, which renders
/// every [`ApiError`] the handlers return.
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/item",
            post(create_item)
                .get(get_item)
                .put(update_item)
                .delete(delete_item),
        )
        .route("/items", get(list_items))
        .route("/items/active", put(bulk_update_active))
        .with_state(shared_service)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(handle_errors))
}

/// JSON body, whatever the request's content type
fn decode<T: DeserializeOwned>(payload: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let bytes = payload.map_err(|rejection| ApiError::decode_request(rejection.body_text()))?;
    serde_json::from_slice(&bytes).map_err(ApiError::decode_request)
}

fn require_id(query: Result<Query<IdQuery>, QueryRejection>) -> Result<String, ApiError> {
    let Query(IdQuery { id }) =
        query.map_err(|rejection| ApiError::decode_request(rejection.body_text()))?;
    if id.is_empty() {
        return Err(ApiError::decode_request(messages::ID_REQUIRED));
    }
    Ok(id)
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/item",
    tag = "Items",
    request_body = ApiItem,
    responses(
        (status = 201, description = "Item created successfully", body = ApiItem),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let input: ApiItem = decode(payload)?;
    let item = service.create_item(input.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiItem::from(item))))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/item",
    tag = "Items",
    params(IdQuery),
    responses(
        (status = 200, description = "Item found", body = ApiItem),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<Json<ApiItem>, ApiError> {
    let id = require_id(query)?;
    let item = service.get_item(&id).await?;
    Ok(Json(item.into()))
}

/// Update an item
#[utoipa::path(
    put,
    path = "/item",
    tag = "Items",
    request_body = ApiItem,
    responses(
        (status = 200, description = "Item updated successfully", body = ApiItem),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<ApiItem>, ApiError> {
    let input: ApiItem = decode(payload)?;
    let item = service.update_item(input.into()).await?;
    Ok(Json(item.into()))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/item",
    tag = "Items",
    params(IdQuery),
    responses(
        (status = 204, description = "Item deleted successfully"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let id = require_id(query)?;
    service.delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all items
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    responses(
        (status = 200, description = "List of items, empty when there are none", body = Vec<ApiItem>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> Result<Json<Vec<ApiItem>>, ApiError> {
    let items = service.list_items().await?;
    Ok(Json(items.into_iter().map(ApiItem::from).collect()))
}

/// Set the active flag on every item
#[utoipa::path(
    put,
    path = "/items/active",
    tag = "Items",
    request_body = BulkActiveRequest,
    responses(
        (status = 200, description = "Matched and modified counts", body = BulkActiveResponse),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn bulk_update_active<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<BulkActiveResponse>, ApiError> {
    let BulkActiveRequest { active } = decode(payload)?;
    let counts = service.bulk_update_active(active).await?;
    Ok(Json(counts.into()))
}
