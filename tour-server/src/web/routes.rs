//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::domain::{DomainError, UserId};
use crate::itinerary::{ItineraryError, ItineraryPlanner, ItineraryRequest, Mode};
use crate::optimizer::{self, OptimizeError};
use crate::preferences::PreferenceError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/cities", get(list_cities))
        .route("/api/optimize", post(optimize_stops))
        .route("/collect_preferences", post(collect_preferences))
        .route("/preferences/:user_id", get(get_preferences))
        .route("/generate_itinerary", post(generate_itinerary))
        .route("/optimize_itinerary", post(optimize_itinerary))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the preference form, or a welcome message for API
/// clients.
async fn index_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !accepts_html(&headers) {
        return Json(WelcomeResponse {
            message: "Welcome to the One-Day Tour Planning Application!".to_string(),
        })
        .into_response();
    }

    let template = IndexTemplate {
        cities: state.catalog.city_names().into_iter().map(String::from).collect(),
        interests: state
            .catalog
            .interests()
            .into_iter()
            .map(|i| i.as_str().to_string())
            .collect(),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// Supported cities and interest tags.
async fn list_cities(State(state): State<AppState>) -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: state.catalog.city_names().into_iter().map(String::from).collect(),
        interests: state
            .catalog
            .interests()
            .into_iter()
            .map(|i| i.as_str().to_string())
            .collect(),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a JSON body manually so we can log it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "JSON parse error");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Save (merge) a user's preferences.
async fn collect_preferences(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CollectPreferencesResponse>, AppError> {
    let input: UserInput = parse_body(&body)?;
    let user_id = input.user_id()?;
    let preferences = input.to_preferences()?;

    let saved = state.preferences.save(&user_id, preferences).await?;
    info!(
        user = %user_id,
        backend = state.preferences.backend(),
        "Preferences saved"
    );

    Ok(Json(CollectPreferencesResponse {
        message: "Preferences saved".to_string(),
        user_id: user_id.to_string(),
        preferences: PreferencesView::from_preferences(&saved),
    }))
}

/// Fetch a user's stored preferences.
async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let user_id = UserId::parse(&user_id)?;
    let preferences = state
        .preferences
        .get(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: format!("No preferences found for user '{user_id}'"),
        })?;

    Ok(Json(PreferencesResponse {
        user_id: user_id.to_string(),
        preferences: PreferencesView::from_preferences(&preferences),
    }))
}

/// Interest and budget filter over stored preferences.
async fn generate_itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    itinerary_response(&state, &headers, &body, Mode::Filter).await
}

/// Travel-cost optimized itinerary over stored preferences.
async fn optimize_itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    itinerary_response(&state, &headers, &body, Mode::Optimize).await
}

async fn itinerary_response(
    state: &AppState,
    headers: &HeaderMap,
    body: &Bytes,
    mode: Mode,
) -> Result<Response, AppError> {
    let input: UserInput = parse_body(body)?;
    let user_id = input.user_id()?;
    let overrides = input.to_preferences()?;

    // Request fields win over what is stored.
    let mut preferences = state
        .preferences
        .get(&user_id)
        .await?
        .ok_or_else(|| ItineraryError::NoPreferences(user_id.to_string()))?;
    preferences.merge(overrides);

    let request = ItineraryRequest::from_preferences(user_id, preferences)?;
    let itinerary = ItineraryPlanner::new(&state.catalog).generate(&request, mode)?;

    // Return HTML or JSON based on Accept header
    if accepts_html(headers) {
        let template = ItineraryTemplate {
            itinerary: ItineraryView::from_itinerary(&itinerary),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(ItineraryResponse::from_itinerary(&itinerary)).into_response())
    }
}

/// Run the optimizer on caller-supplied stops.
async fn optimize_stops(body: Bytes) -> Result<Json<OptimizeResponse>, AppError> {
    let req: OptimizeRequest = parse_body(&body)?;
    let stops = req.to_stops()?;
    let budget = req.budget()?;

    let optimization = optimizer::plan(&stops, budget)?;
    Ok(Json(OptimizeResponse::from_optimization(&optimization)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PreferenceError> for AppError {
    fn from(e: PreferenceError) -> Self {
        AppError::Internal {
            message: format!("preference store: {e}"),
        }
    }
}

impl From<OptimizeError> for AppError {
    fn from(e: OptimizeError) -> Self {
        AppError::Unprocessable {
            message: e.to_string(),
        }
    }
}

impl From<ItineraryError> for AppError {
    fn from(e: ItineraryError) -> Self {
        let message = e.to_string();
        match e {
            ItineraryError::MissingField(_) | ItineraryError::Invalid(_) => {
                AppError::BadRequest { message }
            }
            ItineraryError::NoPreferences(_) => AppError::NotFound { message },
            ItineraryError::UnsupportedCity(_) | ItineraryError::NothingMatches => {
                AppError::Unprocessable { message }
            }
            // Catalog graphs are checked at load time.
            ItineraryError::Optimize(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
