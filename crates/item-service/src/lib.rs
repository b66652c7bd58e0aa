//! # item-service
//!
//! Item management pages (list, detail, add, edit) with server-side form
//! validation built on `form-binding`.
//!
//! The same handlers are mounted once per validation style:
//!
//! | Path | Flow |
//! |---|---|
//! | `/items`, `/validation/v4/items` | [`flow::SeparateForms`] |
//! | `/validation/v3/items` | [`flow::GroupedForm`] |
//! | `/validation/v2/items` | [`flow::Programmatic`] |

pub mod config;
pub mod domain;
pub mod error;
pub mod flow;
pub mod form_context;
pub mod forms;
pub mod handlers;
pub mod messages;
pub mod repository;
pub mod request_context;
pub mod response;
pub mod validation;
pub mod views;

use crate::flow::{GroupedForm, Programmatic, SeparateForms};
use crate::repository::{ItemRepository, RepositoryError};
use crate::response::RedirectResponse;
use axum::{routing::get, Router};
use form_binding::MessageCatalog;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Default `tracing` filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "item_service=debug,form_binding=debug,tower_http=info";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ItemRepository>,
    pub catalog: Arc<MessageCatalog>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ItemRepository>, catalog: Arc<MessageCatalog>) -> Self {
        Self { repository, catalog }
    }
}

/// Router with every mount point and request tracing
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { RedirectResponse::to("/items") }))
        .nest("/items", handlers::flow_router::<SeparateForms>(state.clone(), "/items"))
        .nest(
            "/validation/v4/items",
            handlers::flow_router::<SeparateForms>(state.clone(), "/validation/v4/items"),
        )
        .nest(
            "/validation/v3/items",
            handlers::flow_router::<GroupedForm>(state.clone(), "/validation/v3/items"),
        )
        .nest(
            "/validation/v2/items",
            handlers::flow_router::<Programmatic>(state, "/validation/v2/items"),
        )
        .layer(TraceLayer::new_for_http())
}

/// Insert the demo items
pub async fn seed(repository: &dyn ItemRepository) -> Result<(), RepositoryError> {
    for item in domain::seed_items() {
        let saved = repository.save(item).await?;
        debug!(item_id = ?saved.id, name = %saved.item_name, "seeded item");
    }
    Ok(())
}
