//! HTTP surface: JSON resource routes under `/api` and the profile page.

mod comment;
mod page;
mod profile;
mod response;
mod user;

pub use response::{Failure, Reply, Success};

use std::time::Instant;

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tracing::{debug, info};

use crate::services::Services;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/profile", post(profile::create).get(profile::list))
        .route(
            "/profile/:id",
            get(profile::get).put(profile::update).delete(profile::delete),
        )
        .route("/user", post(user::create).get(user::list))
        .route("/user/:id", get(user::get).put(user::update).delete(user::delete))
        .route("/comment", post(comment::create).get(comment::list))
        .route("/comment/like", post(comment::toggle_like));

    Router::new()
        .route("/", get(page::show))
        .nest("/api", api)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if method == Method::GET && response.status().is_success() {
        debug!(%method, %path, status, elapsed_ms, "Request");
    } else {
        info!(%method, %path, status, elapsed_ms, "Request");
    }
    response
}
