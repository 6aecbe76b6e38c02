use crate::{error::Error, state::AppState};
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use libmapping::{
    core::loadable::Loadable,
    location::{FieldErrors, Location, LocationForm},
};
use minijinja::context;
use tracing::{debug, info, trace, warn};

const LIST_URL: &str = "/";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations))
        .route("/add", get(show_new_location).post(insert_location))
        .route("/{id}/edit", get(show_edit_location).post(update_location))
        .route(
            "/{id}/delete",
            get(show_delete_location).post(delete_location),
        )
}

/// Report a missing location as [Error::NotFound] so that it produces a 404
fn not_found(id: i64) -> impl FnOnce(libmapping::Error) -> Error {
    move |e| {
        if e.is_not_found() {
            Error::NotFound(format!("Unable to find location '{id}'"))
        } else {
            e.into()
        }
    }
}

async fn load_location(id: i64, state: &AppState) -> Result<Location, Error> {
    Location::load(id, &state.db).await.map_err(not_found(id))
}

async fn list_locations(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let locations = Location::load_all(None, None, &state.db).await?;
    trace!("Listing {} locations", locations.len());
    Ok(state.render_template(
        "location_list.html.j2",
        context!(locations => locations,
                 base_url => &state.config.public_base_url),
    ))
}

async fn show_new_location(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    Ok(state.render_template(
        "location_form.html.j2",
        context!(form => LocationForm::default()),
    ))
}

/// Re-render the location form with the submitted values and a message for
/// each rejected field
fn invalid_form_response(
    state: &AppState,
    location: Option<&Location>,
    form: LocationForm,
    errors: FieldErrors,
) -> Response {
    warn!("Rejected location form: {errors}");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        state.render_template(
            "location_form.html.j2",
            context!(location => location,
                     form => form,
                     errors => errors),
        ),
    )
        .into_response()
}

async fn insert_location(
    State(state): State<AppState>,
    Form(params): Form<LocationForm>,
) -> Result<Response, Error> {
    let mut location = match params.to_new_location() {
        Ok(location) => location,
        Err(errors) => return Ok(invalid_form_response(&state, None, params, errors)),
    };
    let id = *location.insert(&state.db).await?;
    info!("Added location {id} '{}'", location.name);
    Ok(Redirect::to(LIST_URL).into_response())
}

async fn show_edit_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let location = load_location(id, &state).await?;
    Ok(state.render_template(
        "location_form.html.j2",
        context!(form => LocationForm::from_location(&location),
                 location => location),
    ))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(params): Form<LocationForm>,
) -> Result<Response, Error> {
    let mut location = load_location(id, &state).await?;
    debug!(?params, "Updating location {id}");
    if let Err(errors) = params.apply_to(&mut location) {
        let form = params.or_location(&location);
        return Ok(invalid_form_response(&state, Some(&location), form, errors));
    }
    location.update(&state.db).await.map_err(not_found(id))?;
    info!("Updated location {id} '{}'", location.name);
    Ok(Redirect::to(LIST_URL).into_response())
}

async fn show_delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let location = load_location(id, &state).await?;
    Ok(state.render_template(
        "location_confirm_delete.html.j2",
        context!(location => location),
    ))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    Location::delete_id(&id, &state.db)
        .await
        .map_err(not_found(id))?;
    info!("Deleted location {id}");
    Ok(Redirect::to(LIST_URL))
}
