//! Computer list, create, edit, update and delete handlers.

use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use super::AppState;
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::forms::ComputerForm;
use crate::paging::{PageRequest, SortColumn, SortOrder, PAGE_SIZE};
use crate::views;

/// First list page, sorted by name ascending, unfiltered.
pub const HOME: &str = "/computers?page=0&sortBy=name&order=asc&filter=";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub filter: Option<String>,
}

impl ListQuery {
    pub fn into_page_request(self) -> Result<PageRequest, AppError> {
        let sort = match self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => s
                .parse::<SortColumn>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => SortColumn::default(),
        };
        let order = match self.order.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => s
                .parse::<SortOrder>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => SortOrder::default(),
        };

        Ok(PageRequest {
            page: self.page.unwrap_or(0),
            page_size: PAGE_SIZE,
            sort,
            order,
            filter: self.filter.unwrap_or_default(),
        })
    }
}

fn redirect_home(state: &AppState, flash: Flash) -> Response {
    (
        [(SET_COOKIE, state.flash.set_cookie(&flash))],
        Redirect::to(HOME),
    )
        .into_response()
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let request = query.into_page_request()?;
    let page = state.computers.page(&request).await?;
    let flash = state.flash.from_headers(&headers);

    let body = Html(views::list_page(&page, &request, flash.as_ref()));
    if flash.is_some() {
        Ok(([(SET_COOKIE, flash::clear_cookie())], body).into_response())
    } else {
        Ok(body.into_response())
    }
}

pub async fn create(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let companies = state.companies.options().await?;
    Ok(Html(views::create_page(
        &ComputerForm::default(),
        &[],
        &companies,
    )))
}

pub async fn save(
    State(state): State<AppState>,
    Form(form): Form<ComputerForm>,
) -> Result<Response, AppError> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let companies = state.companies.options().await?;
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(views::create_page(&form, &errors, &companies)),
            )
                .into_response());
        }
    };

    let computer = state.computers.insert(&data).await?;
    crate::metrics::computer_created();
    tracing::info!(computer_id = computer.id, name = %computer.name, "Computer created");

    Ok(redirect_home(
        &state,
        Flash::success(format!("Computer {} has been created", computer.name)),
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let computer = state
        .computers
        .lookup(id)
        .await?
        .ok_or(AppError::NotFound(id))?;
    let companies = state.companies.options().await?;

    Ok(Html(views::edit_page(
        id,
        &ComputerForm::from_computer(&computer),
        &[],
        &companies,
    )))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ComputerForm>,
) -> Result<Response, AppError> {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let companies = state.companies.options().await?;
            return Ok((
                StatusCode::BAD_REQUEST,
                Html(views::edit_page(id, &form, &errors, &companies)),
            )
                .into_response());
        }
    };

    if !state.computers.update(id, &data).await? {
        return Err(AppError::NotFound(id));
    }
    crate::metrics::computer_updated();
    tracing::info!(computer_id = id, name = %data.name, "Computer updated");

    Ok(redirect_home(
        &state,
        Flash::success(format!("Computer {} has been updated", data.name)),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    if state.computers.delete(id).await? {
        crate::metrics::computer_deleted();
        tracing::info!(computer_id = id, "Computer deleted");
    } else {
        tracing::debug!(computer_id = id, "Delete of unknown computer ignored");
    }

    Ok(redirect_home(&state, Flash::success("Computer has been deleted")))
}
