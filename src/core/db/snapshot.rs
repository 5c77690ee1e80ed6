//! Versioned JSON snapshot of the whole [`Database`].
//!
//! Current layout:
//!
//! ```json
//! { "version": 2, "savedAt": "2026-10-18T09:30:00Z", "database": { "properties": [], ... } }
//! ```
//!
//! Snapshots without a `version` field come from the first release, which
//! stored the raw form fields of every record (Spanish keys, numbers as
//! strings) directly at the top level. Those are migrated on load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::warn;

use crate::core::db::{
    Database,
    contract::{Contract, ContractStatus, UNKNOWN},
    model::{EntityId, iso_date},
    property::{Property, PropertyKind, PropertyStatus},
    service::{ServiceEntry, UtilityServices},
    tenant::{Reference, Tenant},
};

pub const SCHEMA_VERSION: u64 = 2;

const LEGACY_COLLECTIONS: [&str; 9] = [
    "properties",
    "tenants",
    "contracts",
    "payments",
    "maintenance",
    "services",
    "documents",
    "reports",
    "notifications",
];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot version {0} is newer than supported version {max}", max = SCHEMA_VERSION)]
    UnsupportedVersion(u64),
    #[error("snapshot has an unrecognised shape: {0}")]
    Incompatible(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    version: u64,
    saved_at: String,
    database: &'a Database,
}

/// Result of decoding a stored snapshot.
#[derive(Debug)]
pub struct Decoded {
    pub database: Database,
    /// Version the data was migrated from, if it was not current.
    pub migrated_from: Option<u64>,
    /// Legacy records that could not be carried over.
    pub dropped: usize,
}

pub fn encode(database: &Database, saved_at: OffsetDateTime) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        saved_at: saved_at.format(&Rfc3339).unwrap_or_default(),
        database,
    })
}

pub fn decode(raw: &str) -> Result<Decoded, SnapshotError> {
    let Value::Object(mut root) = serde_json::from_str::<Value>(raw)? else {
        return Err(SnapshotError::Incompatible("top level is not an object".into()));
    };

    match root.get("version").cloned() {
        Some(version) => {
            let version = version
                .as_u64()
                .ok_or_else(|| SnapshotError::Incompatible(format!("bad version {version}")))?;
            let database = root.remove("database").unwrap_or(Value::Null);
            match version {
                SCHEMA_VERSION => Ok(Decoded {
                    database: serde_json::from_value(database)?,
                    migrated_from: None,
                    dropped: 0,
                }),
                1 => Ok(migrate_v1(database)),
                v if v > SCHEMA_VERSION => Err(SnapshotError::UnsupportedVersion(v)),
                v => Err(SnapshotError::Incompatible(format!("unknown version {v}"))),
            }
        }
        None if LEGACY_COLLECTIONS.iter().any(|k| root.contains_key(*k)) => {
            Ok(migrate_v1(Value::Object(root)))
        }
        None => Err(SnapshotError::Incompatible(
            "no version and no known collections".into(),
        )),
    }
}

/// Loosely typed form value: the first release stored numbers both as JSON
/// numbers and as the strings typed into inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Loose {
    fn text(&self) -> Option<String> {
        match self {
            Loose::Text(s) if s.trim().is_empty() => None,
            Loose::Text(s) => Some(s.trim().to_string()),
            Loose::Number(n) => Some(n.to_string()),
            Loose::Flag(_) => None,
        }
    }

    fn number(&self) -> Option<f64> {
        match self {
            Loose::Number(n) => Some(*n),
            Loose::Text(s) => s.trim().parse().ok(),
            Loose::Flag(_) => None,
        }
    }
}

fn text(value: &Option<Loose>) -> Option<String> {
    value.as_ref().and_then(Loose::text)
}

fn number(value: &Option<Loose>) -> Option<f64> {
    value.as_ref().and_then(Loose::number)
}

fn count(value: &Option<Loose>) -> Option<u32> {
    number(value).filter(|n| *n >= 0.0).map(|n| n as u32)
}

fn timestamp(value: &Option<Loose>) -> OffsetDateTime {
    text(value)
        .and_then(|raw| OffsetDateTime::parse(&raw, &Rfc3339).ok())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn date(value: &Option<Loose>) -> Option<time::Date> {
    text(value).and_then(|raw| iso_date::parse(&raw).ok())
}

fn id(value: &Option<Loose>, prefix: &str) -> EntityId {
    text(value)
        .map(EntityId::from)
        .unwrap_or_else(|| EntityId::generate(prefix))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacyProperty {
    id: Option<Loose>,
    codigo: Option<Loose>,
    tipo: Option<Loose>,
    nombre: Option<Loose>,
    calle: Option<Loose>,
    num_ext: Option<Loose>,
    num_int: Option<Loose>,
    colonia: Option<Loose>,
    cp: Option<Loose>,
    delegacion: Option<Loose>,
    ciudad: Option<Loose>,
    estado: Option<Loose>,
    recamaras: Option<Loose>,
    banos: Option<Loose>,
    estacionamientos: Option<Loose>,
    m2construccion: Option<Loose>,
    renta: Option<Loose>,
    deposito: Option<Loose>,
    mantenimiento: Option<Loose>,
    status: Option<Loose>,
    created_at: Option<Loose>,
}

impl From<LegacyProperty> for Property {
    fn from(legacy: LegacyProperty) -> Self {
        let status = match text(&legacy.status).as_deref() {
            Some("occupied" | "ocupada") => PropertyStatus::Occupied,
            Some("maintenance" | "mantenimiento") => PropertyStatus::Maintenance,
            _ => PropertyStatus::Available,
        };
        Property {
            id: id(&legacy.id, "PROP"),
            code: text(&legacy.codigo).unwrap_or_default(),
            kind: text(&legacy.tipo)
                .and_then(|t| PropertyKind::from_form_value(&t))
                .unwrap_or(PropertyKind::House),
            name: text(&legacy.nombre),
            street: text(&legacy.calle).unwrap_or_default(),
            exterior_number: text(&legacy.num_ext).unwrap_or_default(),
            interior_number: text(&legacy.num_int),
            neighborhood: text(&legacy.colonia).unwrap_or_default(),
            postal_code: text(&legacy.cp).unwrap_or_default(),
            municipality: text(&legacy.delegacion).unwrap_or_default(),
            city: text(&legacy.ciudad).unwrap_or_default(),
            state: text(&legacy.estado).unwrap_or_default(),
            bedrooms: count(&legacy.recamaras),
            bathrooms: number(&legacy.banos).map(|n| n as f32),
            parking_spaces: count(&legacy.estacionamientos),
            floor_area: number(&legacy.m2construccion),
            rent: number(&legacy.renta).unwrap_or_default(),
            deposit: number(&legacy.deposito),
            maintenance_fee: number(&legacy.mantenimiento),
            status,
            created_at: timestamp(&legacy.created_at),
            _guard: (),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacyTenant {
    id: Option<Loose>,
    name: Option<Loose>,
    nombre: Option<Loose>,
    apellido_paterno: Option<Loose>,
    apellido_materno: Option<Loose>,
    fecha_nacimiento: Option<Loose>,
    rfc: Option<Loose>,
    curp: Option<Loose>,
    ine: Option<Loose>,
    telefono: Option<Loose>,
    phone: Option<Loose>,
    email: Option<Loose>,
    ocupacion: Option<Loose>,
    empresa: Option<Loose>,
    ingreso_mensual: Option<Loose>,
    ref1_nombre: Option<Loose>,
    ref1_telefono: Option<Loose>,
    created_at: Option<Loose>,
}

impl From<LegacyTenant> for Tenant {
    fn from(legacy: LegacyTenant) -> Self {
        let first_name = text(&legacy.nombre).unwrap_or_default();
        let paternal_surname = text(&legacy.apellido_paterno).unwrap_or_default();
        let name = text(&legacy.name)
            .unwrap_or_else(|| format!("{first_name} {paternal_surname}").trim().to_string());
        let references = text(&legacy.ref1_nombre)
            .map(|name| Reference {
                name,
                phone: text(&legacy.ref1_telefono),
            })
            .into_iter()
            .collect();
        Tenant {
            id: id(&legacy.id, "TEN"),
            name,
            first_name,
            paternal_surname,
            maternal_surname: text(&legacy.apellido_materno),
            birth_date: date(&legacy.fecha_nacimiento),
            rfc: text(&legacy.rfc),
            curp: text(&legacy.curp),
            ine: text(&legacy.ine),
            phone: text(&legacy.telefono)
                .or_else(|| text(&legacy.phone))
                .unwrap_or_default(),
            email: text(&legacy.email).unwrap_or_default(),
            occupation: text(&legacy.ocupacion),
            employer: text(&legacy.empresa),
            monthly_income: number(&legacy.ingreso_mensual),
            references,
            created_at: timestamp(&legacy.created_at),
            _guard: (),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LegacyContract {
    id: Option<Loose>,
    number: Option<Loose>,
    propiedad: Option<Loose>,
    inquilino: Option<Loose>,
    fecha_inicio: Option<Loose>,
    fecha_termino: Option<Loose>,
    start_date: Option<Loose>,
    end_date: Option<Loose>,
    monto_renta: Option<Loose>,
    deposito: Option<Loose>,
    dia_pago: Option<Loose>,
    status: Option<Loose>,
    days_to_expire: Option<Loose>,
    tenant: Option<Loose>,
    property: Option<Loose>,
    created_at: Option<Loose>,
}

impl TryFrom<LegacyContract> for Contract {
    type Error = String;

    fn try_from(legacy: LegacyContract) -> Result<Self, Self::Error> {
        let property_id = text(&legacy.propiedad).ok_or("missing property reference")?;
        let tenant_id = text(&legacy.inquilino).ok_or("missing tenant reference")?;
        let start_date = date(&legacy.fecha_inicio)
            .or_else(|| date(&legacy.start_date))
            .ok_or("missing or invalid start date")?;
        let end_date = date(&legacy.fecha_termino)
            .or_else(|| date(&legacy.end_date))
            .ok_or("missing or invalid end date")?;
        let created_at = timestamp(&legacy.created_at);
        let days_to_expiry = number(&legacy.days_to_expire)
            .map(|d| d as i64)
            .unwrap_or_else(|| (end_date - created_at.date()).whole_days());
        let status = match text(&legacy.status).as_deref() {
            Some("expired") => ContractStatus::Expired,
            _ => ContractStatus::Active,
        };
        Ok(Contract {
            id: id(&legacy.id, "CON"),
            number: text(&legacy.number).unwrap_or_default(),
            property_id: property_id.into(),
            tenant_id: tenant_id.into(),
            start_date,
            end_date,
            rent: number(&legacy.monto_renta).unwrap_or_default(),
            deposit: number(&legacy.deposito).unwrap_or_default(),
            payment_day: number(&legacy.dia_pago)
                .map(|d| d.clamp(1.0, 31.0) as u8)
                .unwrap_or(1),
            status,
            days_to_expiry,
            tenant_name: text(&legacy.tenant).unwrap_or_else(|| UNKNOWN.to_string()),
            property_name: text(&legacy.property).unwrap_or_else(|| UNKNOWN.to_string()),
            created_at,
            _guard: (),
        })
    }
}

/// Converts each element, logging and counting the ones that do not fit.
fn carry<T>(
    collection: &str,
    records: Vec<Value>,
    dropped: &mut usize,
    convert: impl Fn(Value) -> Result<T, String>,
) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match convert(record) {
            Ok(record) => Some(record),
            Err(reason) => {
                warn!(collection, index, %reason, "dropping legacy record");
                *dropped += 1;
                None
            }
        })
        .collect()
}

fn typed<T: serde::de::DeserializeOwned>(record: Value) -> Result<T, String> {
    serde_json::from_value(record).map_err(|e| e.to_string())
}

fn take_array(root: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match root.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn migrate_v1(database: Value) -> Decoded {
    let mut root = match database {
        Value::Object(root) => root,
        _ => Map::new(),
    };
    let mut dropped = 0;

    let properties = carry("properties", take_array(&mut root, "properties"), &mut dropped, |v| {
        typed::<LegacyProperty>(v).map(Property::from)
    });
    let tenants = carry("tenants", take_array(&mut root, "tenants"), &mut dropped, |v| {
        typed::<LegacyTenant>(v).map(Tenant::from)
    });
    let contracts = carry("contracts", take_array(&mut root, "contracts"), &mut dropped, |v| {
        typed::<LegacyContract>(v).and_then(Contract::try_from)
    });
    let payments = carry("payments", take_array(&mut root, "payments"), &mut dropped, typed);
    let maintenance = carry("maintenance", take_array(&mut root, "maintenance"), &mut dropped, typed);
    let documents = carry("documents", take_array(&mut root, "documents"), &mut dropped, typed);
    let reports = carry("reports", take_array(&mut root, "reports"), &mut dropped, typed);
    let notifications = carry(
        "notifications",
        take_array(&mut root, "notifications"),
        &mut dropped,
        typed,
    );

    let mut services = UtilityServices::default();
    if let Some(Value::Object(mut legacy)) = root.remove("services") {
        let mut utility = |old: &str, new: &str| -> Vec<ServiceEntry> {
            let entries = take_array(&mut legacy, old);
            carry(new, entries, &mut dropped, typed)
        };
        services.water = utility("agua", "water");
        services.electricity = utility("luz", "electricity");
        services.gas = utility("gas", "gas");
        services.internet = utility("internet", "internet");
    }

    Decoded {
        database: Database {
            properties,
            tenants,
            contracts,
            payments,
            maintenance,
            services,
            documents,
            reports,
            notifications,
        },
        migrated_from: Some(1),
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::{ContractRepository, PropertyRepository, TenantRepository};
    use time::macros::{date, datetime};

    const LEGACY: &str = r#"{
        "properties": [{
            "codigo": "P-01", "tipo": "departamento", "nombre": "", "calle": "Reforma",
            "numExt": "120", "numInt": "4", "colonia": "Centro", "cp": "06000",
            "delegacion": "Cuauhtémoc", "ciudad": "CDMX", "estado": "CDMX",
            "recamaras": "2", "banos": "1.5", "renta": "12500", "deposito": "",
            "id": "PROP1730000000000", "status": "occupied",
            "createdAt": "2024-10-27T03:33:20.000Z"
        }],
        "tenants": [{
            "nombre": "Juan", "apellidoPaterno": "Pérez", "telefono": "5551234",
            "email": "juan@x.com", "ref1Nombre": "Ana", "ref1Telefono": "5550000",
            "id": "TEN1730000000001", "name": "Juan Pérez", "phone": "5551234",
            "createdAt": "2024-10-27T03:33:21.000Z"
        }],
        "contracts": [{
            "propiedad": "PROP1730000000000", "inquilino": "TEN1730000000001",
            "fechaInicio": "2024-11-01", "fechaTermino": "2025-10-31",
            "montoRenta": "12500", "deposito": "12500", "diaPago": "5",
            "id": "CON1730000000002", "number": "CON-000002", "status": "active",
            "daysToExpire": 368, "tenant": "Juan Pérez", "property": "Unknown",
            "startDate": "2024-11-01", "endDate": "2025-10-31"
        }, {
            "propiedad": "PROP1", "inquilino": "TEN1", "fechaInicio": "soon"
        }],
        "payments": [], "maintenance": [],
        "services": { "agua": [], "luz": [], "gas": [], "internet": [] },
        "documents": [], "reports": [], "notifications": []
    }"#;

    #[test]
    fn legacy_snapshot_is_migrated() {
        let decoded = decode(LEGACY).unwrap();
        assert_eq!(decoded.migrated_from, Some(1));
        assert_eq!(decoded.dropped, 1);

        let db = decoded.database;
        let property = &db.properties()[0];
        assert_eq!(property.id.as_str(), "PROP1730000000000");
        assert_eq!(property.kind, PropertyKind::Apartment);
        assert_eq!(property.name, None);
        assert_eq!(property.interior_number.as_deref(), Some("4"));
        assert_eq!(property.bedrooms, Some(2));
        assert_eq!(property.bathrooms, Some(1.5));
        assert_eq!(property.rent, 12500.0);
        assert_eq!(property.deposit, None);
        assert_eq!(property.status, PropertyStatus::Occupied);
        assert_eq!(property.created_at, datetime!(2024-10-27 03:33:20 UTC));

        let tenant = &db.tenants()[0];
        assert_eq!(tenant.name, "Juan Pérez");
        assert_eq!(tenant.phone, "5551234");
        assert_eq!(tenant.references.len(), 1);

        let contract = &db.contracts()[0];
        assert_eq!(contract.start_date, date!(2024 - 11 - 01));
        assert_eq!(contract.payment_day, 5);
        assert_eq!(contract.days_to_expiry, 368);
        assert_eq!(contract.tenant_name, "Juan Pérez");
    }

    #[test]
    fn current_snapshot_round_trips() {
        let decoded = decode(LEGACY).unwrap();
        let raw = encode(&decoded.database, datetime!(2026-10-18 09:30 UTC)).unwrap();
        let again = decode(&raw).unwrap();
        assert_eq!(again.migrated_from, None);
        assert_eq!(again.database, decoded.database);
    }

    #[test]
    fn newer_versions_are_rejected() {
        let err = decode(r#"{"version": 7, "database": {}}"#).unwrap_err();
        assert!(matches!(err, SnapshotError::UnsupportedVersion(7)));
    }

    #[test]
    fn unrelated_json_is_incompatible() {
        assert!(matches!(
            decode(r#"{"theme": "dark"}"#).unwrap_err(),
            SnapshotError::Incompatible(_)
        ));
        assert!(matches!(decode("[1, 2]").unwrap_err(), SnapshotError::Incompatible(_)));
        assert!(matches!(decode("{not json").unwrap_err(), SnapshotError::Malformed(_)));
    }
}
