use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::models::SearchCriteria;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<SearchCriteria>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
}

pub fn success<T>(data: T) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        count: None,
        message: None,
        criteria: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn success_list<T>(items: Vec<T>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        count: Some(items.len()),
        data: Some(items),
        message: None,
        criteria: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn search_results<T>(items: Vec<T>, criteria: SearchCriteria) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        count: Some(items.len()),
        data: Some(items),
        message: None,
        criteria: Some(criteria),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(code: &str, message: impl Into<String>, status: StatusCode) -> Response {
    let body = ApiErrorResponse {
        success: false,
        code: code.to_string(),
        message: message.into(),
    };

    (status, Json(body)).into_response()
}
