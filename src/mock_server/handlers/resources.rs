//! Resource endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::{Document, ErrorDocument, ErrorObject, ResourceObject};

type SharedState = Arc<RwLock<MockState>>;

/// JSON:API error response with a single entry.
fn error_response(status: StatusCode, title: &str, detail: &str) -> Response {
    let mut error = ErrorObject::new(title, detail);
    error.status = Some(status.as_u16().to_string());
    (status, Json(ErrorDocument { errors: vec![error] })).into_response()
}

/// Record the request and check its credentials.
fn admit(state: &mut MockState, method: &Method, path: &str, headers: &HeaderMap) -> Option<Response> {
    state.requests.push(format!("{method} {path}"));

    let token = headers.get("authentication").and_then(|v| v.to_str().ok());
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if state.is_authorized(token, authorization) {
        None
    } else {
        Some(error_response(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Authentication is required to perform this action",
        ))
    }
}

/// GET /{type}
pub async fn list_resources(
    State(state): State<SharedState>,
    Path(resource_type): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Some(denied) = admit(&mut state, &Method::GET, &format!("/{resource_type}"), &headers) {
        return denied;
    }

    let data: Vec<_> = state.list(&resource_type).into_iter().cloned().collect();
    (StatusCode::OK, Json(Document::new(data))).into_response()
}

/// POST /{type}
pub async fn create_resource(
    State(state): State<SharedState>,
    Path(resource_type): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Document<ResourceObject>>,
) -> Response {
    let mut state = state.write().await;
    if let Some(denied) = admit(&mut state, &Method::POST, &format!("/{resource_type}"), &headers) {
        return denied;
    }

    let object = body.into_data();
    if object.resource_type != resource_type {
        return error_response(
            StatusCode::CONFLICT,
            "Conflict",
            &format!("Type '{}' does not match endpoint '{resource_type}'", object.resource_type),
        );
    }

    let created = state.create(&resource_type, object.attributes, object.relationships);
    (StatusCode::CREATED, Json(Document::new(created))).into_response()
}

/// GET /{type}/{id}, including GET /people/current
pub async fn get_resource(
    State(state): State<SharedState>,
    Path((resource_type, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    let path = format!("/{resource_type}/{id}");
    if let Some(denied) = admit(&mut state, &Method::GET, &path, &headers) {
        return denied;
    }

    let found = if resource_type == "people" && id == "current" {
        state.current_user.clone()
    } else {
        state.get(&resource_type, &id).cloned()
    };

    match found {
        Some(resource) => (StatusCode::OK, Json(Document::new(resource))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Not found",
            &format!("Couldn't find {resource_type} with 'id'={id}"),
        ),
    }
}

/// PATCH /{type}/{id}
pub async fn update_resource(
    State(state): State<SharedState>,
    Path((resource_type, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Document<ResourceObject>>,
) -> Response {
    let mut state = state.write().await;
    let path = format!("/{resource_type}/{id}");
    if let Some(denied) = admit(&mut state, &Method::PATCH, &path, &headers) {
        return denied;
    }

    let object = body.into_data();
    if object.id.as_deref() != Some(id.as_str()) {
        return error_response(
            StatusCode::CONFLICT,
            "Conflict",
            "The id in the body does not match the URL",
        );
    }

    match state.update(&resource_type, &id, object.attributes, object.relationships) {
        Some(resource) => (StatusCode::OK, Json(Document::new(resource.clone()))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Not found",
            &format!("Couldn't find {resource_type} with 'id'={id}"),
        ),
    }
}

/// DELETE /{type}/{id}
pub async fn delete_resource(
    State(state): State<SharedState>,
    Path((resource_type, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    let path = format!("/{resource_type}/{id}");
    if let Some(denied) = admit(&mut state, &Method::DELETE, &path, &headers) {
        return denied;
    }

    match state.delete(&resource_type, &id) {
        Some(_) => (StatusCode::OK, Json(json!({ "meta": { "deleted": true } }))).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Not found",
            &format!("Couldn't find {resource_type} with 'id'={id}"),
        ),
    }
}
