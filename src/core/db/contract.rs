use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::core::db::model::{EntityId, iso_date};

/// Display name used when a contract points at a record that no longer exists.
pub const UNKNOWN: &str = "Unknown";

/// Contracts ending within this many days count as expiring.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    #[default]
    Active,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: EntityId,
    pub number: String,
    pub property_id: EntityId,
    pub tenant_id: EntityId,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub rent: f64,
    pub deposit: f64,
    pub payment_day: u8,
    pub status: ContractStatus,
    /// Whole days from creation day to the end date; negative once past.
    pub days_to_expiry: i64,
    pub tenant_name: String,
    pub property_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip)]
    pub(super) _guard: (),
}

impl Contract {
    /// Active and ending within [`EXPIRY_WINDOW_DAYS`].
    pub fn is_expiring(&self) -> bool {
        self.status == ContractStatus::Active && self.days_to_expiry <= EXPIRY_WINDOW_DAYS
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContract {
    pub property_id: EntityId,
    pub tenant_id: EntityId,
    pub start_date: Date,
    pub end_date: Date,
    pub rent: f64,
    pub deposit: f64,
    pub payment_day: u8,
}

/// `CON-2026-0007`
pub fn contract_number(year: i32, sequence: usize) -> String {
    format!("CON-{year}-{sequence:04}")
}

pub trait ContractRepository {
    fn contracts(&self) -> &[Contract];
    /// Appends a contract and marks the referenced property occupied.
    fn add_contract(&mut self, contract: NewContract, created_at: OffsetDateTime) -> &Contract;
    fn contracts_for_tenant(&self, tenant_id: &EntityId) -> Vec<&Contract> {
        self.contracts()
            .iter()
            .filter(|c| &c.tenant_id == tenant_id)
            .collect()
    }
}
