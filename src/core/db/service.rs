use serde::{Deserialize, Serialize};
use time::Date;

use crate::core::db::model::{EntityId, iso_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Utility {
    Water,
    Electricity,
    Gas,
    Internet,
}

impl Utility {
    pub const ALL: [Utility; 4] = [
        Utility::Water,
        Utility::Electricity,
        Utility::Gas,
        Utility::Internet,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Utility::Water => "Agua",
            Utility::Electricity => "Luz",
            Utility::Gas => "Gas",
            Utility::Internet => "Internet",
        }
    }
}

/// One billing period of a utility for one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    pub id: EntityId,
    pub property: String,
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub due_date: Date,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilityServices {
    #[serde(default)]
    pub water: Vec<ServiceEntry>,
    #[serde(default)]
    pub electricity: Vec<ServiceEntry>,
    #[serde(default)]
    pub gas: Vec<ServiceEntry>,
    #[serde(default)]
    pub internet: Vec<ServiceEntry>,
}

impl UtilityServices {
    pub fn entries(&self, utility: Utility) -> &[ServiceEntry] {
        match utility {
            Utility::Water => &self.water,
            Utility::Electricity => &self.electricity,
            Utility::Gas => &self.gas,
            Utility::Internet => &self.internet,
        }
    }

    pub fn entries_mut(&mut self, utility: Utility) -> &mut Vec<ServiceEntry> {
        match utility {
            Utility::Water => &mut self.water,
            Utility::Electricity => &mut self.electricity,
            Utility::Gas => &mut self.gas,
            Utility::Internet => &mut self.internet,
        }
    }

    pub fn is_empty(&self) -> bool {
        Utility::ALL.iter().all(|u| self.entries(*u).is_empty())
    }
}
