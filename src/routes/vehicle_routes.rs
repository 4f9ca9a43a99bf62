use axum::{
    extract::{Extension, Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    AttachDocumentRequest, AvailabilityQuery, AvailabilityResponse, CreateVehicleRequest,
    UpdateVehicleRequest, VehicleDetailResponse, VehicleDocumentResponse, VehicleFilters,
    VehicleListResponse, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_gate::{self, Action};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(retire_vehicle))
        .route("/:id/availability", get(check_availability))
        .route("/:id/documents", post(attach_document))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    access_gate::require(&user, Action::VehicleCreate)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<VehicleListResponse>, AppError> {
    access_gate::require(&user, Action::VehicleList)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    access_gate::require(&user, Action::VehicleGet)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    access_gate::require(&user, Action::VehicleUpdate)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn retire_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    access_gate::require(&user, Action::VehicleRetire)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.retire(&user, id).await?;
    Ok(Json(response))
}

async fn check_availability(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(window): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    access_gate::require(&user, Action::VehicleAvailability)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.availability(id, window.start, window.end).await?;
    Ok(Json(response))
}

async fn attach_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttachDocumentRequest>,
) -> Result<Json<ApiResponse<VehicleDocumentResponse>>, AppError> {
    access_gate::require(&user, Action::DocumentAttach)?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.add_document(&user, id, request).await?;
    Ok(Json(response))
}
