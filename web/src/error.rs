use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use minijinja::context;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Library(#[from] libmapping::Error),
    #[error("Resource Not Found: {0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::Database(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            Error::Other(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error".to_string(),
            ),
            Error::Library(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            Error::Library(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Library error".to_string(),
            ),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
        }
    }
}

// Tell axum how to convert `Error` into a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warn!("Got error for response: {self:?}");
        // placeholder, will get refined in the response mapper
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        // insert the error into the response so that we can log it in the response mapper.
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}

/// Middleware that turns the placeholder response produced by
/// [Error::into_response()] into an error page with the proper status code.
pub(crate) async fn map_error_response(State(state): State<AppState>, response: Response) -> Response {
    let Some(err) = response.extensions().get::<Arc<Error>>().cloned() else {
        return response;
    };
    let (status, message) = err.to_client_status();
    if status.is_server_error() {
        error!("Request failed: {err}");
    }
    (
        status,
        state.render_template(
            "error.html.j2",
            context!(status => status.as_u16(),
                     reason => status.canonical_reason(),
                     message => message),
        ),
    )
        .into_response()
}
