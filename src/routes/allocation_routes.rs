use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::allocation_controller::AllocationController;
use crate::dto::allocation_dto::{
    AllocationFilters, AllocationResponse, CreateAllocationRequest, UpdateAllocationRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_gate::{self, Action};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_allocation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_allocation))
        .route("/", get(list_allocations))
        .route("/:id", put(update_allocation))
        .route("/:id/end", post(end_allocation))
}

async fn create_allocation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateAllocationRequest>,
) -> Result<Json<ApiResponse<AllocationResponse>>, AppError> {
    access_gate::require(&user, Action::AllocationCreate)?;
    let controller = AllocationController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_allocations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<AllocationFilters>,
) -> Result<Json<Vec<AllocationResponse>>, AppError> {
    access_gate::require(&user, Action::AllocationList)?;
    let controller = AllocationController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn update_allocation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAllocationRequest>,
) -> Result<Json<ApiResponse<AllocationResponse>>, AppError> {
    access_gate::require(&user, Action::AllocationUpdate)?;
    let controller = AllocationController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn end_allocation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AllocationResponse>>, AppError> {
    access_gate::require(&user, Action::AllocationEnd)?;
    let controller = AllocationController::new(state.pool.clone());
    let response = controller.end(&user, id).await?;
    Ok(Json(response))
}
