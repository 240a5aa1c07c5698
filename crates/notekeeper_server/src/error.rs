//! HTTP-facing and startup error types.
//!
//! # Responsibility
//! - Map handler failures to status codes and plain-text bodies.
//! - Describe fatal startup failures for the binary entry point.
//!
//! # Invariants
//! - Every error response is logged exactly once, when it is converted.
//! - Not-found failures never carry a `Location` header.

use crate::view::{RenderError, TemplateLoadError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use notekeeper_core::NoteServiceError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::net::SocketAddr;

const VIEW_NOT_FOUND_MESSAGE: &str = "The page does not exist";
const NOTE_NOT_FOUND_MESSAGE: &str = "Note does not exist!";
const DELETE_NOT_FOUND_MESSAGE: &str = "Could not find the resource to delete.";

/// Failure produced by a request handler.
#[derive(Debug)]
pub enum AppError {
    /// A view could not be rendered.
    Render(RenderError),
    /// The addressed note does not exist.
    NoteNotFound {
        status: StatusCode,
        message: &'static str,
        source: NoteServiceError,
    },
}

impl AppError {
    /// Not-found while opening the edit form.
    pub fn edit_not_found(source: NoteServiceError) -> Self {
        Self::NoteNotFound {
            status: StatusCode::NOT_FOUND,
            message: NOTE_NOT_FOUND_MESSAGE,
            source,
        }
    }

    /// Not-found while submitting the edit form.
    pub fn update_not_found(source: NoteServiceError) -> Self {
        Self::NoteNotFound {
            status: StatusCode::BAD_REQUEST,
            message: NOTE_NOT_FOUND_MESSAGE,
            source,
        }
    }

    /// Not-found while deleting.
    pub fn delete_not_found(source: NoteServiceError) -> Self {
        Self::NoteNotFound {
            status: StatusCode::BAD_REQUEST,
            message: DELETE_NOT_FOUND_MESSAGE,
            source,
        }
    }

    /// Returns the response status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoteNotFound { status, .. } => *status,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(err) => write!(f, "{err}"),
            Self::NoteNotFound { source, .. } => write!(f, "{source}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::NoteNotFound { source, .. } => Some(source),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Render(RenderError::ViewNotFound(name)) => {
                error!(
                    "event=http_error module=http status={} error_code=view_not_found view={name}",
                    status.as_u16()
                );
                VIEW_NOT_FOUND_MESSAGE.to_string()
            }
            Self::Render(RenderError::Render(err)) => {
                error!(
                    "event=http_error module=http status={} error_code=render_failed error={err}",
                    status.as_u16()
                );
                err.to_string()
            }
            Self::NoteNotFound {
                message, source, ..
            } => {
                warn!(
                    "event=http_error module=http status={} error_code=note_not_found error={source}",
                    status.as_u16()
                );
                (*message).to_string()
            }
        };
        (status, body).into_response()
    }
}

/// Fatal failure before or while serving.
#[derive(Debug)]
pub enum StartupError {
    Logging(String),
    Templates(TemplateLoadError),
    Bind { addr: SocketAddr, source: io::Error },
    Serve(io::Error),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Templates(err) => write!(f, "template load failed: {err}"),
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
            Self::Serve(err) => write!(f, "server error: {err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Templates(err) => Some(err),
            Self::Bind { source, .. } => Some(source),
            Self::Serve(err) => Some(err),
        }
    }
}

impl From<TemplateLoadError> for StartupError {
    fn from(value: TemplateLoadError) -> Self {
        Self::Templates(value)
    }
}
