// HTML pages returned to the browser by the OAuth callback
use crate::application::renderer::svg::escape_text;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

fn page(status: StatusCode, heading: &str, message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{heading}</title></head>\n<body style=\"font-family: sans-serif; text-align: center; padding-top: 80px;\">\n<h1>{heading}</h1>\n<p>{message}</p>\n</body>\n</html>\n",
        heading = escape_text(heading),
        message = escape_text(message),
    );
    (status, Html(body)).into_response()
}

pub fn authorized_page() -> Response {
    page(
        StatusCode::OK,
        "Authorization successful",
        "You can close this window and return to the terminal.",
    )
}

pub fn state_mismatch_page() -> Response {
    page(
        StatusCode::BAD_REQUEST,
        "Authorization failed",
        "State validation failed. Please restart the authorization from the terminal.",
    )
}

pub fn denied_page(error: &str, description: &str) -> Response {
    page(
        StatusCode::BAD_REQUEST,
        "Authorization failed",
        &format!("{}: {}", error, description),
    )
}

pub fn already_handled_page() -> Response {
    page(
        StatusCode::CONFLICT,
        "Already handled",
        "This authorization attempt has already completed.",
    )
}
