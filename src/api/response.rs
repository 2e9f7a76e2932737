//! Response envelope and the single failure → HTTP status mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Success envelope: `{success: true, message, data}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

/// Failure envelope: `{success: false, message}`
#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

/// A successful handler result with its status code
pub struct Reply<T> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> Reply<T> {
    pub fn ok(data: T) -> Self {
        Self { status: StatusCode::OK, data }
    }

    pub fn created(data: T) -> Self {
        Self { status: StatusCode::CREATED, data }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let body = Success {
            success: true,
            message: "success",
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = %self.code(), "{}", self.format_for_log());
        } else {
            debug!(code = %self.code(), status = status.as_u16(), "{}", self);
        }

        let body = Failure {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Unwrap a JSON body, turning extractor rejections into validation errors.
pub fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Error::validation(rejection.body_text()))
}

/// Unwrap a query string, turning extractor rejections into validation errors.
pub fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| Error::validation(rejection.body_text()))
}
