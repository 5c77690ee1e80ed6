use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::core::db::model::{EntityId, iso_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Pagado",
            PaymentStatus::Pending => "Pendiente",
            PaymentStatus::Overdue => "Vencido",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: EntityId,
    pub tenant: String,
    pub property: String,
    pub concept: String,
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub due_date: Date,
    pub status: PaymentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip)]
    pub(super) _guard: (),
}

pub trait PaymentRepository {
    fn payments(&self) -> &[Payment];
}
