// File: src/handlers.rs
// Purpose: Item routes: list, detail, and the add/edit form round trips

use crate::error::AppError;
use crate::flow::{self, ItemFlow};
use crate::form_context::FormContext;
use crate::forms::ItemFields;
use crate::request_context::{negotiate_locale, FormData};
use crate::response::{HtmlPage, RedirectResponse};
use crate::views;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use form_binding::{Bindable, BindingResult, ValidatorRegistry};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// State for one mount point
#[derive(Clone)]
pub struct FlowState {
    pub app: AppState,
    pub registry: Arc<ValidatorRegistry>,
    /// Path prefix the routes are nested under, used to build links
    pub base: Arc<str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    /// Set by the redirect after a successful create; any value shows the banner
    pub status: Option<String>,
}

/// Item routes for flow `F`, to be nested under `base`
pub fn flow_router<F: ItemFlow>(app: AppState, base: &str) -> Router {
    let state = FlowState {
        app,
        registry: Arc::new(F::registry()),
        base: Arc::from(base),
    };
    Router::new()
        .route("/", get(list))
        .route("/add", get(add_form::<F>).post(add_item::<F>))
        .route("/:id", get(detail))
        .route("/:id/edit", get(edit_form::<F>).post(edit_item::<F>))
        .with_state(state)
}

pub async fn list(State(state): State<FlowState>) -> Result<Response, AppError> {
    let items = state.app.repository.find_all().await?;
    Ok(HtmlPage::new(views::items_page(&state.base, &items)).into_response())
}

pub async fn detail(
    State(state): State<FlowState>,
    path: Result<Path<i64>, PathRejection>,
    Query(query): Query<DetailQuery>,
) -> Result<Response, AppError> {
    let item = state.app.repository.find_by_id(item_id(path)?).await?;
    let saved = query.status.is_some();
    Ok(HtmlPage::new(views::item_page(&state.base, &item, saved)).into_response())
}

pub async fn add_form<F: ItemFlow>(State(state): State<FlowState>) -> Response {
    let form = FormContext::from_target(&F::SaveForm::default());
    HtmlPage::new(views::add_form_page(&state.base, &form)).into_response()
}

pub async fn add_item<F: ItemFlow>(
    State(state): State<FlowState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let data = FormData::from_request(&headers, &body);
    let (form, result) = flow::bind_save::<F>(&data, &state.registry);

    if result.has_errors() {
        info!(errors = %result, "item submission rejected");
        let context = form_context(&state, &headers, &form, &result);
        return Ok(HtmlPage::new(views::add_form_page(&state.base, &context))
            .no_cache()
            .into_response());
    }

    let saved = state.app.repository.save(form.to_item()?).await?;
    let id = saved.id.unwrap_or_default();
    info!(item_id = id, "item saved");
    Ok(RedirectResponse::to(format!("{}/{}?status=true", state.base, id)).into_response())
}

pub async fn edit_form<F: ItemFlow>(
    State(state): State<FlowState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let id = item_id(path)?;
    let item = state.app.repository.find_by_id(id).await?;
    let form = FormContext::from_target(&F::UpdateForm::from(&item));
    Ok(HtmlPage::new(views::edit_form_page(&state.base, id, &form)).into_response())
}

pub async fn edit_item<F: ItemFlow>(
    State(state): State<FlowState>,
    path: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let id = item_id(path)?;
    // Unknown ids are a 404 whatever was submitted
    state.app.repository.find_by_id(id).await?;

    let data = FormData::from_request(&headers, &body);
    let (form, result) = flow::bind_update::<F>(id, &data, &state.registry);

    if result.has_errors() {
        info!(item_id = id, errors = %result, "item update rejected");
        let context = form_context(&state, &headers, &form, &result);
        return Ok(HtmlPage::new(views::edit_form_page(&state.base, id, &context))
            .no_cache()
            .into_response());
    }

    state.app.repository.update(id, form.to_item()?).await?;
    info!(item_id = id, "item updated");
    Ok(RedirectResponse::to(format!("{}/{}", state.base, id)).into_response())
}

/// Ids that do not parse name no item
fn item_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        debug!(error = %rejection, "unparseable item id");
        AppError::InvalidId
    })
}

fn form_context(
    state: &FlowState,
    headers: &HeaderMap,
    form: &dyn Bindable,
    result: &BindingResult,
) -> FormContext {
    let catalog = &state.app.catalog;
    let locale = negotiate_locale(headers, catalog.default_locale());
    FormContext::from_binding_result(form, result, catalog, &locale)
}
