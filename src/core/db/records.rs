use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::db::model::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: EntityId,
    pub title: String,
    pub property_id: Option<EntityId>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Monthly,
    Occupancy,
    Payments,
    Tax,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Monthly,
        ReportKind::Occupancy,
        ReportKind::Payments,
        ReportKind::Tax,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Monthly => "Reporte Mensual",
            ReportKind::Occupancy => "Reporte de Ocupación",
            ReportKind::Payments => "Reporte de Pagos",
            ReportKind::Tax => "Reporte Fiscal",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReportKind::Monthly => "Estado financiero del mes",
            ReportKind::Occupancy => "Análisis de propiedades",
            ReportKind::Payments => "Historial de cobros",
            ReportKind::Tax => "Información para SAT",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Monthly => "monthly",
            ReportKind::Occupancy => "occupancy",
            ReportKind::Payments => "payments",
            ReportKind::Tax => "tax",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: EntityId,
    pub kind: ReportKind,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: EntityId,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub trait ReportRepository {
    fn reports(&self) -> &[Report];
    fn add_report(&mut self, kind: ReportKind, generated_at: OffsetDateTime) -> &Report;
}

pub trait NotificationRepository {
    fn notifications(&self) -> &[Notification];
    fn unread_notifications(&self) -> usize {
        self.notifications().iter().filter(|n| !n.read).count()
    }
}
