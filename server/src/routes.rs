//! Generic REST handlers shared by every entity collection.
//!
//! For an entity kind `E` the router exposes:
//! - `GET /E` (list, or lookup by `E::LOOKUP_PARAM`)
//! - `GET /E/{id}`
//! - `POST /E`
//! - `PUT /E/{id}`
//! - `DELETE /E/{id}`
//!
//! Any GET that carries `?callback=fn` is answered as `fn(<json>);`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::models::Entity;
use crate::store::EntityStore;

pub const CALLBACK_PARAM: &str = "callback";

pub struct ResourceState<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
}

impl<E: Entity> Clone for ResourceState<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

pub fn resource_router<E: Entity>(store: Arc<dyn EntityStore<E>>) -> Router {
    let collection = format!("/{}", E::COLLECTION);
    let item = format!("/{}/{{id}}", E::COLLECTION);
    Router::new()
        .route(&collection, get(list_or_lookup::<E>).post(create::<E>))
        .route(
            &item,
            get(get_by_id::<E>).put(replace::<E>).delete(delete::<E>),
        )
        .with_state(ResourceState { store })
}

fn render<T: Serialize>(value: &T, callback: Option<&String>) -> Response {
    let Some(callback) = callback else {
        return Json(value).into_response();
    };
    match serde_json::to_string(value) {
        Ok(json) => (
            [(header::CONTENT_TYPE, "application/javascript")],
            format!("{callback}({json});"),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to serialize JSONP payload: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn list_or_lookup<E: Entity>(
    State(state): State<ResourceState<E>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let callback = params.get(CALLBACK_PARAM);
    match params.get(E::LOOKUP_PARAM) {
        Some(key) => {
            let found = state.store.find_by_key(key).await;
            render(&found, callback)
        }
        None => render(&state.store.list().await, callback),
    }
}

async fn get_by_id<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match state.store.get(id).await {
        Some(entity) => render(&entity, params.get(CALLBACK_PARAM)),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create<E: Entity>(
    State(state): State<ResourceState<E>>,
    headers: HeaderMap,
    Json(input): Json<E>,
) -> Response {
    let created = state.store.create(input).await;
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let location = format!("http://{host}/{}/{}", E::COLLECTION, created.id());
    debug!("Created {} at {}", E::COLLECTION, location);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response()
}

async fn replace<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(id): Path<i64>,
    Json(mut input): Json<E>,
) -> StatusCode {
    input.set_id(id);
    if state.store.replace(input).await {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn delete<E: Entity>(State(state): State<ResourceState<E>>, Path(id): Path<i64>) -> StatusCode {
    if state.store.delete(id).await {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}
