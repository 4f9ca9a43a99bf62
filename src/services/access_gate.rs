//! Tabla de capacidades por rol
//!
//! Toda autorización pasa por una sola tabla {rol × acción}. El middleware
//! JWT autentica; aquí se decide si el rol puede ejecutar la acción.

use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::utils::errors::{AppError, AppResult};

/// Acciones protegidas de la API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    VehicleList,
    VehicleGet,
    VehicleCreate,
    VehicleUpdate,
    VehicleRetire,
    VehicleAvailability,
    DocumentAttach,
    UserList,
    UserGet,
    UserCreate,
    UserUpdate,
    ReservationList,
    ReservationCreate,
    ReservationDecide,
    ReservationStart,
    ReservationCancel,
    ReturnRecord,
    AllocationList,
    AllocationCreate,
    AllocationUpdate,
    AllocationEnd,
    EventList,
    EventCreate,
    ReportView,
}

/// Verifica si un rol puede ejecutar una acción
pub fn role_allows(role: UserRole, action: Action) -> bool {
    match action {
        // Consultas abiertas a cualquier usuario autenticado
        Action::VehicleList
        | Action::VehicleGet
        | Action::VehicleAvailability
        | Action::ReservationList
        | Action::EventList => true,

        // Ciclo de reserva del propio solicitante (la propiedad se
        // verifica en el controller; aquí solo el rol)
        Action::ReservationCreate
        | Action::ReservationStart
        | Action::ReservationCancel
        | Action::ReturnRecord => true,

        // Decisión de reservas: supervisores hacia arriba
        Action::ReservationDecide => matches!(
            role,
            UserRole::Supervisor | UserRole::FleetManager | UserRole::Admin
        ),

        // Gestión de flota, asignaciones, eventos y reportes
        Action::VehicleCreate
        | Action::VehicleUpdate
        | Action::VehicleRetire
        | Action::DocumentAttach
        | Action::AllocationList
        | Action::AllocationCreate
        | Action::AllocationUpdate
        | Action::AllocationEnd
        | Action::EventCreate
        | Action::ReportView => matches!(role, UserRole::FleetManager | UserRole::Admin),

        // Administración de usuarios
        Action::UserList | Action::UserGet | Action::UserCreate | Action::UserUpdate => {
            matches!(role, UserRole::Admin)
        }
    }
}

/// Exige que el usuario autenticado pueda ejecutar la acción
pub fn require(user: &AuthenticatedUser, action: Action) -> AppResult<()> {
    if role_allows(user.role, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "No tienes permiso para realizar esta acción".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user_with_role(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role,
            email: "prueba@flota.com".to_string(),
        }
    }

    #[test]
    fn test_requester_operates_own_reservation_cycle() {
        for action in [
            Action::ReservationCreate,
            Action::ReservationStart,
            Action::ReservationCancel,
            Action::ReturnRecord,
            Action::ReservationList,
            Action::VehicleList,
            Action::VehicleGet,
            Action::VehicleAvailability,
            Action::EventList,
        ] {
            assert!(role_allows(UserRole::Requester, action), "{:?}", action);
        }
    }

    #[test]
    fn test_requester_cannot_manage_fleet_or_decide() {
        for action in [
            Action::ReservationDecide,
            Action::VehicleCreate,
            Action::VehicleUpdate,
            Action::VehicleRetire,
            Action::DocumentAttach,
            Action::AllocationList,
            Action::AllocationCreate,
            Action::AllocationUpdate,
            Action::AllocationEnd,
            Action::EventCreate,
            Action::ReportView,
            Action::UserList,
            Action::UserCreate,
        ] {
            assert!(!role_allows(UserRole::Requester, action), "{:?}", action);
        }
    }

    #[test]
    fn test_supervisor_decides_but_does_not_manage_fleet() {
        assert!(role_allows(UserRole::Supervisor, Action::ReservationDecide));
        assert!(!role_allows(UserRole::Supervisor, Action::VehicleCreate));
        assert!(!role_allows(UserRole::Supervisor, Action::AllocationCreate));
        assert!(!role_allows(UserRole::Supervisor, Action::ReportView));
        assert!(!role_allows(UserRole::Supervisor, Action::UserCreate));
    }

    #[test]
    fn test_fleet_manager_manages_fleet_but_not_users() {
        for action in [
            Action::VehicleCreate,
            Action::VehicleUpdate,
            Action::VehicleRetire,
            Action::DocumentAttach,
            Action::AllocationCreate,
            Action::AllocationEnd,
            Action::EventCreate,
            Action::ReportView,
            Action::ReservationDecide,
        ] {
            assert!(role_allows(UserRole::FleetManager, action), "{:?}", action);
        }
        assert!(!role_allows(UserRole::FleetManager, Action::UserList));
        assert!(!role_allows(UserRole::FleetManager, Action::UserUpdate));
    }

    #[test]
    fn test_admin_allows_everything() {
        for action in [
            Action::VehicleCreate,
            Action::VehicleRetire,
            Action::UserList,
            Action::UserGet,
            Action::UserCreate,
            Action::UserUpdate,
            Action::AllocationCreate,
            Action::EventCreate,
            Action::ReportView,
            Action::ReservationDecide,
            Action::ReservationCreate,
        ] {
            assert!(role_allows(UserRole::Admin, action), "{:?}", action);
        }
    }

    #[test]
    fn test_require_returns_forbidden_on_denial() {
        let requester = user_with_role(UserRole::Requester);
        let result = require(&requester, Action::ReportView);
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let admin = user_with_role(UserRole::Admin);
        assert!(require(&admin, Action::ReportView).is_ok());
    }
}
