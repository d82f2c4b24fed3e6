use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_macros::debug_handler;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::{any::Any, sync::Arc};

use crate::{
    dto::NoteTransfer,
    service::{NoteService, NoteServiceError},
};

#[derive(OpenApi)]
#[openapi(
    paths(get_all_notes, get_one_note, create_note, update_note, delete_note),
    components(schemas(NoteTransfer)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notes", get(get_all_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_one_note).put(update_note).delete(delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(service)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Hello from notes service!").into_response()
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

fn error_response(e: NoteServiceError, action: &str) -> Response {
    match e {
        NoteServiceError::NotFound => {
            tracing::warn!("failed to {action}: note not found");
            StatusCode::NOT_FOUND.into_response()
        }
        NoteServiceError::Invalid(message) => {
            tracing::warn!("failed to {action}: {message}");
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        NoteServiceError::Store(e) => {
            tracing::error!("failed to {action}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Undecodable JSON is a bad request; size and content type rejections keep
/// their own status (413, 415).
fn rejection_response(rejection: &JsonRejection) -> Response {
    tracing::warn!("rejected note payload: {rejection}");
    let status = match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => rejection.status(),
    };
    (status, rejection.body_text()).into_response()
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "Notes successfully retrieved", body = Vec<NoteTransfer>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => error_response(e, "get note entries"),
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note ID found", body = NoteTransfer),
        (status = 404, description = "Note ID not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.get_one_note(id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(e, "get note entry"),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = NoteTransfer,
    responses(
        (status = 201, description = "Note created", headers(
            ("Location" = String, description = "Path of the created note")
        )),
        (status = 400, description = "Note validation has failed", body = String),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NoteTransfer>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match service.create_note(payload).await {
        Ok(note) => match note.id {
            Some(id) => (
                StatusCode::CREATED,
                [(header::LOCATION, format!("/notes/{id}"))],
            )
                .into_response(),
            None => StatusCode::CREATED.into_response(),
        },
        Err(e) => error_response(e, "create note entry"),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = NoteTransfer,
    responses(
        (status = 200, description = "Note updated", body = NoteTransfer),
        (status = 400, description = "Note validation has failed", body = String),
        (status = 404, description = "Note ID not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
    payload: Result<Json<NoteTransfer>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match service.update_note(id, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(e, "update note entry"),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    match service.delete_note(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "delete note entry"),
    }
}
