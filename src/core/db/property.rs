use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::db::model::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    House,
    Apartment,
    Commercial,
    Office,
    Warehouse,
    Land,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 6] = [
        PropertyKind::House,
        PropertyKind::Apartment,
        PropertyKind::Commercial,
        PropertyKind::Office,
        PropertyKind::Warehouse,
        PropertyKind::Land,
    ];

    /// Value submitted by the property form's type selector.
    pub fn form_value(self) -> &'static str {
        match self {
            PropertyKind::House => "casa",
            PropertyKind::Apartment => "departamento",
            PropertyKind::Commercial => "local",
            PropertyKind::Office => "oficina",
            PropertyKind::Warehouse => "bodega",
            PropertyKind::Land => "terreno",
        }
    }

    pub fn from_form_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.form_value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyKind::House => "Casa",
            PropertyKind::Apartment => "Departamento",
            PropertyKind::Commercial => "Local Comercial",
            PropertyKind::Office => "Oficina",
            PropertyKind::Warehouse => "Bodega",
            PropertyKind::Land => "Terreno",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

impl PropertyStatus {
    pub fn label(self) -> &'static str {
        match self {
            PropertyStatus::Available => "Disponible",
            PropertyStatus::Occupied => "Ocupada",
            PropertyStatus::Maintenance => "Mantenimiento",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Occupied => "occupied",
            PropertyStatus::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: EntityId,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub name: Option<String>,
    pub street: String,
    pub exterior_number: String,
    pub interior_number: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub municipality: String,
    pub city: String,
    pub state: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f32>,
    pub parking_spaces: Option<u32>,
    pub floor_area: Option<f64>,
    pub rent: f64,
    pub deposit: Option<f64>,
    pub maintenance_fee: Option<f64>,
    pub status: PropertyStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip)]
    pub(super) _guard: (),
}

impl Property {
    /// `Calle Reforma 120 Int. 4, Centro`
    pub fn address(&self) -> String {
        let mut address = format!("{} {}", self.street, self.exterior_number);
        if let Some(interior) = &self.interior_number {
            address.push_str(" Int. ");
            address.push_str(interior);
        }
        if !self.neighborhood.is_empty() {
            address.push_str(", ");
            address.push_str(&self.neighborhood);
        }
        address
    }

    /// The alias when one was given, otherwise the street address.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.address(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub code: String,
    pub kind: PropertyKind,
    pub name: Option<String>,
    pub street: String,
    pub exterior_number: String,
    pub interior_number: Option<String>,
    pub neighborhood: String,
    pub postal_code: String,
    pub municipality: String,
    pub city: String,
    pub state: String,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f32>,
    pub parking_spaces: Option<u32>,
    pub floor_area: Option<f64>,
    pub rent: f64,
    pub deposit: Option<f64>,
    pub maintenance_fee: Option<f64>,
}

pub trait PropertyRepository {
    fn properties(&self) -> &[Property];
    fn property_by_id(&self, id: &EntityId) -> Option<&Property>;
    fn add_property(&mut self, property: NewProperty, created_at: OffsetDateTime) -> &Property;
    fn set_property_status(&mut self, id: &EntityId, status: PropertyStatus) -> Option<&Property>;

    /// Share of properties currently occupied, rounded to a whole percent.
    fn occupancy_percent(&self) -> u32 {
        let properties = self.properties();
        if properties.is_empty() {
            return 0;
        }
        let occupied = properties
            .iter()
            .filter(|p| p.status == PropertyStatus::Occupied)
            .count();
        ((occupied as f64 / properties.len() as f64) * 100.0).round() as u32
    }
}
