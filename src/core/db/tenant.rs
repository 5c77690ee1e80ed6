use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::core::db::model::{EntityId, iso_date};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: EntityId,
    /// First name followed by the paternal surname.
    pub name: String,
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub birth_date: Option<Date>,
    pub rfc: Option<String>,
    pub curp: Option<String>,
    pub ine: Option<String>,
    pub phone: String,
    pub email: String,
    pub occupation: Option<String>,
    pub employer: Option<String>,
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip)]
    pub(super) _guard: (),
}

impl Tenant {
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('U')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub birth_date: Option<Date>,
    pub rfc: Option<String>,
    pub curp: Option<String>,
    pub ine: Option<String>,
    pub phone: String,
    pub email: String,
    pub occupation: Option<String>,
    pub employer: Option<String>,
    pub monthly_income: Option<f64>,
    pub references: Vec<Reference>,
}

impl NewTenant {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.paternal_surname)
    }
}

pub trait TenantRepository {
    fn tenants(&self) -> &[Tenant];
    fn tenant_by_id(&self, id: &EntityId) -> Option<&Tenant>;
    fn add_tenant(&mut self, tenant: NewTenant, created_at: OffsetDateTime) -> &Tenant;
}
