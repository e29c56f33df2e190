//! HTTP route handlers
//!
//! Every failure is turned into a response here: bad credentials re-render
//! the form, dispatch failures come back as JSON. Nothing escapes to the
//! server loop.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use hd_core::AppRegistry;

use super::pages;
use crate::metrics;
use crate::session::{clear_cookie, session_cookie, set_cookie};
use crate::state::AppState;

/// Submitted login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /open-app`
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAppRequest {
    pub app_name: String,
}

/// Outcome of a dispatch, as returned to the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub success: bool,
    pub message: String,
}

impl DispatchResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(login_page).post(login))
        .route("/dashboard", get(dashboard))
        .route("/open-app", post(open_app))
        .route("/logout", get(logout))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn login_page(State(state): State<Arc<AppState>>) -> Html<String> {
    state.metrics.record_request("GET", "/");
    Html(pages::login_page(None))
}

async fn login(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    state.metrics.record_request("POST", "/");

    // An unreadable body is a failed login like any other
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!("Unreadable login form: {}", rejection);
            return Html(pages::login_page(Some("Invalid credentials"))).into_response();
        }
    };

    if state.credentials.authenticate(&form.username, &form.password) {
        let cookie = state.sessions.create(&form.username);
        tracing::info!("User '{}' logged in successfully", form.username);
        return (
            [(header::SET_COOKIE, set_cookie(&cookie))],
            Redirect::to("/dashboard"),
        )
            .into_response();
    }

    tracing::warn!("Failed login attempt for user '{}'", form.username);
    Html(pages::login_page(Some("Invalid credentials"))).into_response()
}

async fn dashboard(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(username) = state.sessions.user_from_headers(&headers) else {
        return Redirect::to("/").into_response();
    };

    state.metrics.record_request("GET", "/dashboard");
    state.metrics.set_system_status(1);
    Html(pages::dashboard_page(&username, &state.registry)).into_response()
}

async fn open_app(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<OpenAppRequest>, JsonRejection>,
) -> (StatusCode, Json<DispatchResponse>) {
    state.metrics.record_request("POST", "/open-app");

    let Some(username) = state.sessions.user_from_headers(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(DispatchResponse::failure("Unauthorized")),
        );
    };

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Malformed open-app request from '{}': {}", username, rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(DispatchResponse::failure(format!(
                    "Invalid request: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    let (status, response) = dispatch(&state, &username, &request.app_name).await;
    (status, Json(response))
}

/// Resolve the requested app and run its launch command
async fn dispatch(
    state: &AppState,
    username: &str,
    app_name: &str,
) -> (StatusCode, DispatchResponse) {
    tracing::info!("User '{}' requested to open app: {}", username, app_name);
    state.metrics.record_app_open(app_name);

    let Some(target) = state.registry.resolve(app_name) else {
        tracing::warn!("Unknown application requested: {}", app_name);
        return (
            StatusCode::BAD_REQUEST,
            DispatchResponse::failure("Unknown application"),
        );
    };

    let command = AppRegistry::launch_command(target);
    match state.runner.run(&command).await {
        Ok(_) => {
            tracing::info!("Successfully opened {}", target);
            (
                StatusCode::OK,
                DispatchResponse::success(format!("Opened {}", target)),
            )
        }
        Err(e) => {
            tracing::error!("Failed to open {}: {}", target, e);
            (
                StatusCode::OK,
                DispatchResponse::failure(format!("Failed: {}", e)),
            )
        }
    }
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    state.metrics.record_request("GET", "/logout");

    if let Some(cookie) = session_cookie(&headers) {
        if let Some(username) = state.sessions.remove(&cookie) {
            tracing::info!("User '{}' logged out", username);
        }
    }

    ([(header::SET_COOKIE, clear_cookie())], Redirect::to("/")).into_response()
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, metrics::CONTENT_TYPE)],
        state.metrics.render(),
    )
}
