use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::reservation_dto::{
    CreateReservationRequest, RejectReservationRequest, ReservationFilters,
    ReservationListResponse, ReservationResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_gate::{self, Action};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/", get(list_reservations))
        .route("/:id/approve", post(approve_reservation))
        .route("/:id/reject", post(reject_reservation))
        .route("/:id/start", post(start_reservation))
        .route("/:id/cancel", post(cancel_reservation))
}

async fn create_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    access_gate::require(&user, Action::ReservationCreate)?;
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_reservations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ReservationFilters>,
) -> Result<Json<ReservationListResponse>, AppError> {
    access_gate::require(&user, Action::ReservationList)?;
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.list(&user, filters).await?;
    Ok(Json(response))
}

async fn approve_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    access_gate::require(&user, Action::ReservationDecide)?;
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.approve(&user, id).await?;
    Ok(Json(response))
}

async fn reject_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    access_gate::require(&user, Action::ReservationDecide)?;
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.reject(&user, id, request).await?;
    Ok(Json(response))
}

async fn start_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    access_gate::require(&user, Action::ReservationStart)?;
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.start(&user, id).await?;
    Ok(Json(response))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    access_gate::require(&user, Action::ReservationCancel)?;
    let controller = ReservationController::new(state.pool.clone());
    let response = controller.cancel(&user, id).await?;
    Ok(Json(response))
}
