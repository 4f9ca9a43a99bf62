use axum::{
    extract::{Extension, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::event_controller::EventController;
use crate::dto::event_dto::{CreateEventRequest, EventFilters, EventListResponse, EventResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_gate::{self, Action};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_event_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event))
        .route("/", get(list_events))
}

async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<EventResponse>>, AppError> {
    access_gate::require(&user, Action::EventCreate)?;
    let controller = EventController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_events(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<EventFilters>,
) -> Result<Json<EventListResponse>, AppError> {
    access_gate::require(&user, Action::EventList)?;
    let controller = EventController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}
