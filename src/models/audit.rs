//! Modelo de auditoría
//!
//! Este módulo contiene los tipos del registro de auditoría. El registro
//! es sólo de inserción: nunca se actualiza ni se borra un asiento.

use serde::{Deserialize, Serialize};
use sqlx::Type;

/// Entidad sobre la que se audita - mapea al ENUM audit_entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "audit_entity", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditEntity {
    Vehicle,
    User,
    Reservation,
    Allocation,
    Return,
    Event,
    Document,
}

/// Resultado de la operación auditada - mapea al ENUM audit_outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "audit_outcome", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Failure,
}

/// Acción auditada - mapea al ENUM audit_action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "audit_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    ReservationCreated,
    ReservationApproved,
    ReservationRejected,
    ReservationStarted,
    ReservationCancelled,
    ReservationCompleted,
    AllocationCreated,
    AllocationUpdated,
    AllocationEnded,
    ReturnRecorded,
    VehicleCreated,
    VehicleUpdated,
    VehicleRetired,
    DocumentAttached,
    EventRecorded,
    UserCreated,
    UserUpdated,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ReservationCreated => "reservation_created",
            AuditAction::ReservationApproved => "reservation_approved",
            AuditAction::ReservationRejected => "reservation_rejected",
            AuditAction::ReservationStarted => "reservation_started",
            AuditAction::ReservationCancelled => "reservation_cancelled",
            AuditAction::ReservationCompleted => "reservation_completed",
            AuditAction::AllocationCreated => "allocation_created",
            AuditAction::AllocationUpdated => "allocation_updated",
            AuditAction::AllocationEnded => "allocation_ended",
            AuditAction::ReturnRecorded => "return_recorded",
            AuditAction::VehicleCreated => "vehicle_created",
            AuditAction::VehicleUpdated => "vehicle_updated",
            AuditAction::VehicleRetired => "vehicle_retired",
            AuditAction::DocumentAttached => "document_attached",
            AuditAction::EventRecorded => "event_recorded",
            AuditAction::UserCreated => "user_created",
            AuditAction::UserUpdated => "user_updated",
        }
    }
}
