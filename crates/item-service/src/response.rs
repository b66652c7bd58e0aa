// File: src/response.rs
// Purpose: HTML page and POST-redirect-GET response builders

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use maud::Markup;
use tracing::error;

/// A rendered maud page with a status code
pub struct HtmlPage {
    status: StatusCode,
    headers: HeaderMap,
    markup: Markup,
}

impl HtmlPage {
    pub fn new(markup: Markup) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            markup,
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Re-rendered forms carry user input; keep them out of caches
    pub fn no_cache(mut self) -> Self {
        self.headers
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        self
    }
}

impl IntoResponse for HtmlPage {
    fn into_response(self) -> Response {
        (self.status, self.headers, Html(self.markup.into_string())).into_response()
    }
}

/// `303 See Other` to the given location
pub struct RedirectResponse {
    status: StatusCode,
    location: String,
}

impl RedirectResponse {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SEE_OTHER,
            location: location.into(),
        }
    }

}

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.location) {
            Ok(location) => (self.status, [(header::LOCATION, location)]).into_response(),
            Err(_) => {
                error!(location = %self.location, "invalid redirect location");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
