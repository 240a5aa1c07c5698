//! Route handlers for the note pages.
//!
//! # Responsibility
//! - Translate one HTTP request into one note use-case call.
//! - Render a view for page requests, redirect to the list after mutations.
//!
//! # Invariants
//! - Successful mutations answer `302 Found` with `Location: /`.
//! - Failed mutations answer with an error status and never redirect.
//! - Missing form fields, a missing body or a non-form content type all read
//!   as empty strings.
//! - A trailing-slash redirect is only issued toward a path some route serves.

use crate::error::AppError;
use crate::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use log::debug;
use minijinja::context;
use serde::Deserialize;

/// Paths served exactly as written.
const EXACT_ROUTES: [&str; 3] = ["/", "/notes/add", "/notes/save"];

/// Path prefixes followed by one `{id}` segment.
const ID_ROUTE_PREFIXES: [&str; 3] = ["/notes/edit/", "/notes/update/", "/notes/delete/"];

/// Fields posted by the add and edit forms.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub title: String,
    pub description: String,
}

impl NoteForm {
    /// Accepts whatever the body holds; an unreadable form is an empty one.
    fn or_empty(form: Result<Form<Self>, FormRejection>) -> Self {
        match form {
            Ok(Form(form)) => form,
            Err(rejection) => {
                debug!(
                    "event=form_parse module=http status=defaulted rejection_status={} reason={}",
                    rejection.status().as_u16(),
                    rejection.body_text()
                );
                Self::default()
            }
        }
    }
}

/// `GET /`
pub async fn list_notes(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let notes = state.service.list_notes();
    let page = state.views.render("index", context! { notes })?;
    Ok(Html(page))
}

/// `GET /notes/add`
pub async fn add_note(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = state.views.render("add", context! {})?;
    Ok(Html(page))
}

/// `POST /notes/save`
pub async fn save_note(
    State(state): State<AppState>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Response {
    let form = NoteForm::or_empty(form);
    state.service.create_note(&form.title, &form.description);
    redirect_to_list()
}

/// `GET /notes/edit/{id}`
pub async fn edit_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let note = state
        .service
        .edit_view(&id)
        .map_err(AppError::edit_not_found)?;
    let page = state.views.render("edit", context! { note })?;
    Ok(Html(page))
}

/// `POST /notes/update/{id}`
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = NoteForm::or_empty(form);
    state
        .service
        .update_note(&id, &form.title, &form.description)
        .map_err(AppError::update_not_found)?;
    Ok(redirect_to_list())
}

/// `POST /notes/delete/{id}`
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    state
        .service
        .delete_note(&id)
        .map_err(AppError::delete_not_found)?;
    Ok(redirect_to_list())
}

/// Unmatched paths: `301` to the slash-less form when a route serves it,
/// otherwise `404`.
pub async fn fallback(uri: Uri) -> Response {
    let path = uri.path();
    let trimmed = path.trim_end_matches('/');
    if path.ends_with('/') && !trimmed.is_empty() && is_routed_path(trimmed) {
        let location = match uri.query() {
            Some(query) => format!("{trimmed}?{query}"),
            None => trimmed.to_string(),
        };
        return (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, location)],
        )
            .into_response();
    }
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}

fn is_routed_path(path: &str) -> bool {
    EXACT_ROUTES.contains(&path)
        || ID_ROUTE_PREFIXES.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|id| !id.is_empty() && !id.contains('/'))
        })
}

fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
