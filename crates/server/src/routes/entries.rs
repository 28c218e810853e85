//! Entry pages and the HTMX fragments behind them.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use service::{
    entry::domain::EntryInput,
    errors::ServiceError,
    pagination::Pagination,
};

use crate::errors::PageError;
use crate::state::AppState;
use crate::views::{pages, partials, partials::EntryForm};

const HX_REQUEST: &str = "hx-request";
const HX_REDIRECT: &str = "hx-redirect";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub skip: i64,
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key(HX_REQUEST)
}

/// Non-numeric ids name no entry.
fn parse_id(raw: &str) -> Result<i32, PageError> {
    raw.parse().map_err(|_| PageError::NotFound)
}

/// Malformed query strings get the HTML error page rather than axum's plain-text rejection.
fn search_params(params: Result<Query<SearchParams>, QueryRejection>) -> Result<SearchParams, PageError> {
    params.map(|Query(p)| p).map_err(|e| PageError::BadRequest(e.body_text()))
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let recent = state
        .entries
        .list_recent()
        .await
        .map_err(|e| PageError::from_service(e, state.environment()))?;
    Ok(Html(pages::index(&recent, &EntryForm::default())))
}

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Html<String>, PageError> {
    let params = search_params(params)?;
    let page = state
        .entries
        .search_entries(&params.query, Pagination::new(params.skip, state.page_size()))
        .await
        .map_err(|e| PageError::from_service(e, state.environment()))?;
    if is_htmx(&headers) {
        Ok(Html(partials::entry_page(&page)))
    } else {
        Ok(Html(pages::entries(&page)))
    }
}

pub async fn autocomplete(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Html<String>, PageError> {
    if !is_htmx(&headers) {
        return Err(PageError::BadRequest("autocomplete answers HTMX requests only".into()));
    }
    let params = search_params(params)?;
    let has_query = !params.query.is_empty();
    let entries = state
        .entries
        .autocomplete(&params.query)
        .await
        .map_err(|e| PageError::from_service(e, state.environment()))?;
    Ok(Html(partials::search_results(&entries, has_query)))
}

pub async fn create(State(state): State<AppState>, Form(input): Form<EntryInput>) -> Result<Response, PageError> {
    match state.entries.create_entry(input.clone()).await {
        Ok(entry) => Ok(found(format!("/{}", entry.id))),
        Err(ServiceError::Validation(errors)) => {
            let recent = state
                .entries
                .list_recent()
                .await
                .map_err(|e| PageError::from_service(e, state.environment()))?;
            let form = EntryForm::rejected(&input, errors);
            Ok(Html(pages::index(&recent, &form)).into_response())
        }
        Err(e) => Err(PageError::from_service(e, state.environment())),
    }
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>, PageError> {
    let id = parse_id(&id)?;
    let entry = state
        .entries
        .get_entry(id)
        .await
        .map_err(|e| PageError::from_service(e, state.environment()))?;
    Ok(Html(pages::show(&entry)))
}

pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>, PageError> {
    let id = parse_id(&id)?;
    let entry = state
        .entries
        .get_entry(id)
        .await
        .map_err(|e| PageError::from_service(e, state.environment()))?;
    Ok(Html(pages::edit(id, &EntryForm::from_entry(&entry))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<EntryInput>,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    match state.entries.edit_entry(id, input.clone()).await {
        Ok(entry) => Ok(found(format!("/{}", entry.id))),
        Err(ServiceError::Validation(errors)) => {
            let form = EntryForm::rejected(&input, errors);
            Ok(Html(pages::edit(id, &form)).into_response())
        }
        Err(e) => Err(PageError::from_service(e, state.environment())),
    }
}

/// HTMX follows `HX-Redirect` back to the home page.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    state
        .entries
        .delete_entry(id)
        .await
        .map_err(|e| PageError::from_service(e, state.environment()))?;
    Ok((StatusCode::OK, [(HX_REDIRECT, "/")]).into_response())
}
