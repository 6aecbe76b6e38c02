use crate::state::AppState;
use axum::Router;

mod location;
#[cfg(test)]
mod tests;

pub(crate) fn router() -> Router<AppState> {
    Router::new().merge(location::router())
}
