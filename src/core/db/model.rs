use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Identifier of a stored record, e.g. `TEN-6f1c0d2e...`.
///
/// Identifiers carry a short kind prefix followed by a random 128-bit value,
/// so two records created within the same instant never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Source of "now" for timestamps and day counts.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> OffsetDateTime;

    fn today(&self) -> Date {
        self.now().date()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        // The local offset is unavailable on some platforms once threads are running.
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// `YYYY-MM-DD` calendar dates, the format produced by date inputs.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    pub const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn parse(raw: &str) -> Result<Date, time::error::Parse> {
        Date::parse(raw.trim(), FORMAT)
    }

    pub fn format(date: Date) -> String {
        date.format(FORMAT).unwrap_or_default()
    }

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
        use time::Date;

        pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw).map(Some).map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// Formats an amount as `$12,450` (or `$1,234.50` when it has cents).
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match cents % 100 {
        0 => format!("{sign}${grouped}"),
        frac => format!("{sign}${grouped}.{frac:02}"),
    }
}

/// Spanish month name, as shown in report titles.
pub fn month_name(month: time::Month) -> &'static str {
    use time::Month::*;
    match month {
        January => "Enero",
        February => "Febrero",
        March => "Marzo",
        April => "Abril",
        May => "Mayo",
        June => "Junio",
        July => "Julio",
        August => "Agosto",
        September => "Septiembre",
        October => "Octubre",
        November => "Noviembre",
        December => "Diciembre",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn money_is_grouped_by_thousands() {
        assert_eq!(format_money(0.0), "$0");
        assert_eq!(format_money(950.0), "$950");
        assert_eq!(format_money(12450.0), "$12,450");
        assert_eq!(format_money(485320.0), "$485,320");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(-1500.0), "-$1,500");
    }

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let a = EntityId::generate("TEN");
        let b = EntityId::generate("TEN");
        assert!(a.as_str().starts_with("TEN-"));
        assert_eq!(a.as_str().len(), "TEN-".len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn iso_dates_parse_and_format() {
        let parsed = iso_date::parse("2026-02-28").unwrap();
        assert_eq!(parsed, date!(2026 - 02 - 28));
        assert_eq!(iso_date::format(parsed), "2026-02-28");
        assert!(iso_date::parse("28/02/2026").is_err());
    }
}
