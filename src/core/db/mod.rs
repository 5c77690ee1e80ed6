mod backup;
mod contract;
mod maintenance;
mod model;
mod payment;
mod property;
mod records;
mod service;
mod snapshot;
#[cfg(feature = "sqlite")]
mod sqlite;
mod storage;
mod tenant;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

pub use backup::{SNAPSHOT_ENTRY, read_backup, write_backup};
pub use contract::{
    Contract, ContractRepository, ContractStatus, EXPIRY_WINDOW_DAYS, NewContract, UNKNOWN,
    contract_number,
};
pub use maintenance::{MaintenanceKind, MaintenanceOrder, MaintenanceRepository, OrderStatus, Priority};
pub use model::{Clock, EntityId, FixedClock, SystemClock, format_money, iso_date, month_name};
pub use payment::{Payment, PaymentRepository, PaymentStatus};
pub use property::{NewProperty, Property, PropertyKind, PropertyRepository, PropertyStatus};
pub use records::{
    Document, Notification, NotificationRepository, Report, ReportKind, ReportRepository,
};
pub use service::{ServiceEntry, Utility, UtilityServices};
pub use snapshot::{Decoded, SCHEMA_VERSION, SnapshotError, decode, encode};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;
pub use storage::{DEFAULT_QUOTA_BYTES, KeyValueStorage, MemoryStorage, StorageError};
pub use tenant::{NewTenant, Reference, Tenant, TenantRepository};

/// Storage key the snapshot lives under.
pub const DEFAULT_STORAGE_KEY: &str = "megaMobileData";

/// Every collection the application keeps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    properties: Vec<Property>,
    #[serde(default)]
    tenants: Vec<Tenant>,
    #[serde(default)]
    contracts: Vec<Contract>,
    #[serde(default)]
    payments: Vec<Payment>,
    #[serde(default)]
    maintenance: Vec<MaintenanceOrder>,
    #[serde(default)]
    services: UtilityServices,
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    reports: Vec<Report>,
    #[serde(default)]
    notifications: Vec<Notification>,
}

impl Database {
    pub fn services(&self) -> &UtilityServices {
        &self.services
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.tenants.is_empty()
            && self.contracts.is_empty()
            && self.payments.is_empty()
            && self.maintenance.is_empty()
            && self.services.is_empty()
            && self.documents.is_empty()
            && self.reports.is_empty()
            && self.notifications.is_empty()
    }
}

impl PropertyRepository for Database {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn property_by_id(&self, id: &EntityId) -> Option<&Property> {
        self.properties.iter().find(|p| &p.id == id)
    }

    fn add_property(&mut self, property: NewProperty, created_at: OffsetDateTime) -> &Property {
        let record = Property {
            id: EntityId::generate("PROP"),
            code: property.code,
            kind: property.kind,
            name: property.name,
            street: property.street,
            exterior_number: property.exterior_number,
            interior_number: property.interior_number,
            neighborhood: property.neighborhood,
            postal_code: property.postal_code,
            municipality: property.municipality,
            city: property.city,
            state: property.state,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            parking_spaces: property.parking_spaces,
            floor_area: property.floor_area,
            rent: property.rent,
            deposit: property.deposit,
            maintenance_fee: property.maintenance_fee,
            status: PropertyStatus::Available,
            created_at,
            _guard: (),
        };
        info!(id = %record.id, code = %record.code, "property created");
        let index = self.properties.len();
        self.properties.push(record);
        &self.properties[index]
    }

    fn set_property_status(&mut self, id: &EntityId, status: PropertyStatus) -> Option<&Property> {
        let property = self.properties.iter_mut().find(|p| &p.id == id)?;
        debug!(id = %property.id, from = ?property.status, to = ?status, "property status changed");
        property.status = status;
        Some(property)
    }
}

impl TenantRepository for Database {
    fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    fn tenant_by_id(&self, id: &EntityId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| &t.id == id)
    }

    fn add_tenant(&mut self, tenant: NewTenant, created_at: OffsetDateTime) -> &Tenant {
        let record = Tenant {
            id: EntityId::generate("TEN"),
            name: tenant.display_name(),
            first_name: tenant.first_name,
            paternal_surname: tenant.paternal_surname,
            maternal_surname: tenant.maternal_surname,
            birth_date: tenant.birth_date,
            rfc: tenant.rfc,
            curp: tenant.curp,
            ine: tenant.ine,
            phone: tenant.phone,
            email: tenant.email,
            occupation: tenant.occupation,
            employer: tenant.employer,
            monthly_income: tenant.monthly_income,
            references: tenant.references,
            created_at,
            _guard: (),
        };
        info!(id = %record.id, "tenant created");
        let index = self.tenants.len();
        self.tenants.push(record);
        &self.tenants[index]
    }
}

impl ContractRepository for Database {
    fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    fn add_contract(&mut self, contract: NewContract, created_at: OffsetDateTime) -> &Contract {
        let today = created_at.date();
        let tenant_name = self
            .tenant_by_id(&contract.tenant_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let property_name = self
            .property_by_id(&contract.property_id)
            .map(Property::display_name)
            .unwrap_or_else(|| UNKNOWN.to_string());
        if tenant_name == UNKNOWN || property_name == UNKNOWN {
            warn!(
                tenant = %contract.tenant_id,
                property = %contract.property_id,
                "contract references a missing record"
            );
        }

        let record = Contract {
            id: EntityId::generate("CON"),
            number: contract_number(today.year(), self.contracts.len() + 1),
            status: if contract.end_date < today {
                ContractStatus::Expired
            } else {
                ContractStatus::Active
            },
            days_to_expiry: (contract.end_date - today).whole_days(),
            property_id: contract.property_id,
            tenant_id: contract.tenant_id,
            start_date: contract.start_date,
            end_date: contract.end_date,
            rent: contract.rent,
            deposit: contract.deposit,
            payment_day: contract.payment_day,
            tenant_name,
            property_name,
            created_at,
            _guard: (),
        };
        info!(id = %record.id, number = %record.number, "contract created");

        self.set_property_status(&record.property_id, PropertyStatus::Occupied);
        let index = self.contracts.len();
        self.contracts.push(record);
        &self.contracts[index]
    }
}

impl PaymentRepository for Database {
    fn payments(&self) -> &[Payment] {
        &self.payments
    }
}

impl MaintenanceRepository for Database {
    fn maintenance_orders(&self) -> &[MaintenanceOrder] {
        &self.maintenance
    }
}

impl ReportRepository for Database {
    fn reports(&self) -> &[Report] {
        &self.reports
    }

    fn add_report(&mut self, kind: ReportKind, generated_at: OffsetDateTime) -> &Report {
        let report = Report {
            id: EntityId::generate("RPT"),
            kind,
            title: format!(
                "{} {} {}",
                kind.label(),
                month_name(generated_at.month()),
                generated_at.year()
            ),
            generated_at,
        };
        info!(id = %report.id, kind = kind.as_str(), "report generated");
        let index = self.reports.len();
        self.reports.push(report);
        &self.reports[index]
    }
}

impl NotificationRepository for Database {
    fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The in-memory [`Database`] mirrored to a single key of a [`KeyValueStorage`].
#[derive(Debug)]
pub struct Store<S> {
    storage: S,
    key: String,
    database: Database,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStorage> Store<S> {
    /// Opens the store and loads whatever snapshot is stored under `key`.
    pub async fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            database: Database::default(),
            clock: Arc::new(SystemClock),
        };
        store.database = store.load().await;
        store
    }

    /// Clock stamped into exported snapshots.
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    /// Reads the stored snapshot. Never fails: a missing, unreadable or
    /// unrecognised snapshot yields the empty database.
    pub async fn load(&self) -> Database {
        let raw = match self.storage.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored snapshot");
                return Database::default();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read snapshot; starting empty");
                return Database::default();
            }
        };

        match snapshot::decode(&raw) {
            Ok(decoded) => {
                if let Some(from) = decoded.migrated_from {
                    info!(from, to = SCHEMA_VERSION, dropped = decoded.dropped, "migrated snapshot");
                }
                decoded.database
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring stored snapshot; starting empty");
                Database::default()
            }
        }
    }

    pub async fn reload(&mut self) {
        self.database = self.load().await;
    }

    /// Writes the whole database under the store key.
    pub async fn save(&self) -> Result<(), StoreError> {
        let raw = self.export_json()?;
        self.storage.set_item(&self.key, &raw).await?;
        debug!(key = %self.key, bytes = raw.len(), "snapshot saved");
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(snapshot::encode(&self.database, self.clock.now())?)
    }

    /// Replaces the in-memory database with a decoded snapshot (migrating old
    /// layouts). The caller decides when to [`save`](Self::save).
    pub fn import_json(&mut self, raw: &str) -> Result<Decoded, SnapshotError> {
        let decoded = snapshot::decode(raw)?;
        self.database = decoded.database.clone();
        Ok(decoded)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
