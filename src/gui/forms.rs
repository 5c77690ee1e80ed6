//! Entity-creation forms: field schemas, typed-in values and the input-layer
//! checks that run before anything reaches the [`Database`].

use std::collections::BTreeMap;

use thiserror::Error;
use time::Date;

use crate::{
    core::db::{
        Database, EntityId, NewContract, NewProperty, NewTenant, PropertyKind,
        PropertyRepository, Reference, TenantRepository, iso_date,
    },
    gui::router::View,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Property,
    Tenant,
    Contract,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Property, FormKind::Tenant, FormKind::Contract];

    pub fn spec(self) -> &'static FormSpec {
        match self {
            FormKind::Property => &PROPERTY_FORM,
            FormKind::Tenant => &TENANT_FORM,
            FormKind::Contract => &CONTRACT_FORM,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormKind::Property => "property",
            FormKind::Tenant => "tenant",
            FormKind::Contract => "contract",
        }
    }

    /// The list a saved record shows up in.
    pub fn list_view(self) -> View {
        match self {
            FormKind::Property => View::Properties,
            FormKind::Tenant => View::Tenants,
            FormKind::Contract => View::Contracts,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Property => "Propiedad guardada exitosamente",
            FormKind::Tenant => "Inquilino guardado exitosamente",
            FormKind::Contract => "Contrato creado exitosamente",
        }
    }
}

/// Where the options of a select come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Choices {
    PropertyKinds,
    Properties,
    Tenants,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    Text,
    Tel,
    Email,
    Date,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Select {
        choices: Choices,
        placeholder: &'static str,
    },
}

impl InputKind {
    const AMOUNT: InputKind = InputKind::Number {
        min: None,
        max: None,
        step: None,
    };
    const COUNT: InputKind = InputKind::Number {
        min: Some(0.0),
        max: None,
        step: Some(1.0),
    };

    pub fn html_type(self) -> &'static str {
        match self {
            InputKind::Text | InputKind::Select { .. } => "text",
            InputKind::Tel => "tel",
            InputKind::Email => "email",
            InputKind::Date => "date",
            InputKind::Number { .. } => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
    pub default: Option<&'static str>,
    pub placeholder: Option<&'static str>,
    pub max_length: Option<u32>,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            name,
            label,
            input,
            required: false,
            default: None,
            placeholder: None,
            max_length: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    const fn max_length(mut self, length: u32) -> Self {
        self.max_length = Some(length);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub heading: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormSpec {
    pub kind: FormKind,
    pub title: &'static str,
    pub dom_id: &'static str,
    pub sections: &'static [Section],
}

impl FormSpec {
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().find(|f| f.name == name)
    }
}

use self::InputKind::{Date as DateInput, Email, Tel, Text};

static PROPERTY_FORM: FormSpec = FormSpec {
    kind: FormKind::Property,
    title: "Nueva Propiedad",
    dom_id: "propertyModal",
    sections: &[
        Section {
            heading: Some("Información Básica"),
            fields: &[
                FieldSpec::new("codigo", "Código de Propiedad", Text).required(),
                FieldSpec::new(
                    "tipo",
                    "Tipo de Propiedad",
                    InputKind::Select {
                        choices: Choices::PropertyKinds,
                        placeholder: "Seleccionar...",
                    },
                )
                .required(),
                FieldSpec::new("nombre", "Nombre/Alias", Text).placeholder("Ej: Casa de la Colina"),
            ],
        },
        Section {
            heading: Some("Dirección"),
            fields: &[
                FieldSpec::new("calle", "Calle", Text).required(),
                FieldSpec::new("numExt", "Núm. Ext", Text).required(),
                FieldSpec::new("numInt", "Núm. Int", Text),
                FieldSpec::new("colonia", "Colonia", Text).required(),
                FieldSpec::new("cp", "Código Postal", Tel).required().max_length(5),
                FieldSpec::new("delegacion", "Delegación/Municipio", Text).required(),
                FieldSpec::new("ciudad", "Ciudad", Text).required(),
                FieldSpec::new("estado", "Estado", Text).required(),
            ],
        },
        Section {
            heading: Some("Características"),
            fields: &[
                FieldSpec::new("recamaras", "Recámaras", InputKind::COUNT),
                FieldSpec::new(
                    "banos",
                    "Baños",
                    InputKind::Number {
                        min: Some(0.0),
                        max: None,
                        step: Some(0.5),
                    },
                ),
                FieldSpec::new("estacionamientos", "Estacionamientos", InputKind::COUNT),
                FieldSpec::new(
                    "m2construccion",
                    "M² Construcción",
                    InputKind::Number {
                        min: Some(0.0),
                        max: None,
                        step: None,
                    },
                ),
            ],
        },
        Section {
            heading: Some("Información Financiera"),
            fields: &[
                FieldSpec::new("renta", "Precio de Renta", InputKind::AMOUNT).required(),
                FieldSpec::new("deposito", "Depósito", InputKind::AMOUNT),
                FieldSpec::new("mantenimiento", "Cuota de Mantenimiento", InputKind::AMOUNT),
            ],
        },
    ],
};

static TENANT_FORM: FormSpec = FormSpec {
    kind: FormKind::Tenant,
    title: "Nuevo Inquilino",
    dom_id: "tenantModal",
    sections: &[
        Section {
            heading: Some("Información Personal"),
            fields: &[
                FieldSpec::new("nombre", "Nombre(s)", Text).required(),
                FieldSpec::new("apellidoPaterno", "Apellido Paterno", Text).required(),
                FieldSpec::new("apellidoMaterno", "Apellido Materno", Text),
                FieldSpec::new("fechaNacimiento", "Fecha de Nacimiento", DateInput),
            ],
        },
        Section {
            heading: Some("Documentos"),
            fields: &[
                FieldSpec::new("rfc", "RFC", Text).max_length(13),
                FieldSpec::new("curp", "CURP", Text).max_length(18),
                FieldSpec::new("ine", "INE/IFE", Text),
            ],
        },
        Section {
            heading: Some("Contacto"),
            fields: &[
                FieldSpec::new("telefono", "Teléfono Celular", Tel).required(),
                FieldSpec::new("email", "Email", Email).required(),
            ],
        },
        Section {
            heading: Some("Información Laboral"),
            fields: &[
                FieldSpec::new("ocupacion", "Ocupación", Text),
                FieldSpec::new("empresa", "Empresa", Text),
                FieldSpec::new("ingresoMensual", "Ingreso Mensual", InputKind::AMOUNT),
            ],
        },
        Section {
            heading: Some("Referencias"),
            fields: &[
                FieldSpec::new("ref1Nombre", "Nombre Referencia 1", Text),
                FieldSpec::new("ref1Telefono", "Teléfono Referencia 1", Tel),
            ],
        },
    ],
};

static CONTRACT_FORM: FormSpec = FormSpec {
    kind: FormKind::Contract,
    title: "Nuevo Contrato",
    dom_id: "contractModal",
    sections: &[Section {
        heading: None,
        fields: &[
            FieldSpec::new(
                "propiedad",
                "Propiedad",
                InputKind::Select {
                    choices: Choices::Properties,
                    placeholder: "Seleccionar propiedad...",
                },
            )
            .required(),
            FieldSpec::new(
                "inquilino",
                "Inquilino",
                InputKind::Select {
                    choices: Choices::Tenants,
                    placeholder: "Seleccionar inquilino...",
                },
            )
            .required(),
            FieldSpec::new("fechaInicio", "Fecha de Inicio", DateInput).required(),
            FieldSpec::new("fechaTermino", "Fecha de Término", DateInput).required(),
            FieldSpec::new("montoRenta", "Monto de Renta", InputKind::AMOUNT).required(),
            FieldSpec::new("deposito", "Depósito", InputKind::AMOUNT).required(),
            FieldSpec::new(
                "diaPago",
                "Día de Pago",
                InputKind::Number {
                    min: Some(1.0),
                    max: Some(31.0),
                    step: Some(1.0),
                },
            )
            .default_value("1"),
        ],
    }],
};

/// Values typed into a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn with_defaults(kind: FormKind) -> Self {
        Self(
            kind.spec()
                .fields()
                .filter_map(|f| Some((f.name.to_string(), f.default?.to_string())))
                .collect(),
        )
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// The raw value, as last typed.
    pub fn raw(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or_default()
    }

    /// The trimmed value, or `None` when blank.
    pub fn get(&self, field: &str) -> Option<&str> {
        Some(self.raw(field).trim()).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{label} es obligatorio")]
    Missing { label: &'static str },
    #[error("{label}: \"{value}\" no es un número válido")]
    InvalidNumber { label: &'static str, value: String },
    #[error("{label}: \"{value}\" no es una fecha válida")]
    InvalidDate { label: &'static str, value: String },
    #[error("{label}: \"{value}\" no es una opción válida")]
    InvalidChoice { label: &'static str, value: String },
    #[error("{label} debe estar entre {min} y {max}")]
    OutOfRange {
        label: &'static str,
        min: String,
        max: String,
    },
}

/// Per-field problems found while reading a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, FormError>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&FormError> {
        self.0.get(field)
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FormError)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

/// A form that passed every input-layer check, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Property(NewProperty),
    Tenant(NewTenant),
    Contract(NewContract),
}

/// Reads `data` against the form's schema. Every field is checked so the
/// caller gets all problems at once.
pub fn parse(kind: FormKind, data: &FormData, db: &Database) -> Result<Submission, FieldErrors> {
    let mut reader = Reader {
        spec: kind.spec(),
        data,
        db,
        errors: FieldErrors::default(),
    };
    let submission = match kind {
        FormKind::Property => read_property(&mut reader).map(Submission::Property),
        FormKind::Tenant => read_tenant(&mut reader).map(Submission::Tenant),
        FormKind::Contract => read_contract(&mut reader).map(Submission::Contract),
    };
    match submission {
        Some(submission) if reader.errors.is_empty() => Ok(submission),
        _ => Err(reader.errors),
    }
}

struct Reader<'a> {
    spec: &'static FormSpec,
    data: &'a FormData,
    db: &'a Database,
    errors: FieldErrors,
}

impl Reader<'_> {
    fn spec_of(&self, name: &'static str) -> FieldSpec {
        self.spec
            .field(name)
            .copied()
            .unwrap_or(FieldSpec::new(name, name, InputKind::Text))
    }

    fn fail(&mut self, name: &'static str, error: FormError) {
        self.errors.0.entry(name).or_insert(error);
    }

    /// Trimmed value; records `Missing` for blank required fields.
    fn text(&mut self, name: &'static str) -> Option<String> {
        let field = self.spec_of(name);
        let data = self.data;
        match data.get(name) {
            Some(value) => Some(value.to_string()),
            None => {
                if field.required {
                    self.fail(name, FormError::Missing { label: field.label });
                }
                None
            }
        }
    }

    fn number(&mut self, name: &'static str) -> Option<f64> {
        let field = self.spec_of(name);
        let raw = self.text(name)?;
        let Some(value) = raw.parse::<f64>().ok().filter(|v| v.is_finite()) else {
            self.fail(name, FormError::InvalidNumber { label: field.label, value: raw });
            return None;
        };
        if let InputKind::Number { min, max, step } = field.input {
            let below = min.is_some_and(|min| value < min);
            let above = max.is_some_and(|max| value > max);
            if below || above {
                self.fail(
                    name,
                    FormError::OutOfRange {
                        label: field.label,
                        min: min.map(|m| m.to_string()).unwrap_or_else(|| "-∞".into()),
                        max: max.map(|m| m.to_string()).unwrap_or_else(|| "∞".into()),
                    },
                );
                return None;
            }
            if let Some(step) = step.filter(|s| *s > 0.0) {
                let steps = value / step;
                if (steps - steps.round()).abs() > 1e-9 {
                    self.fail(name, FormError::InvalidNumber { label: field.label, value: raw });
                    return None;
                }
            }
        }
        Some(value)
    }

    fn count(&mut self, name: &'static str) -> Option<u32> {
        self.number(name).map(|n| n as u32)
    }

    fn date(&mut self, name: &'static str) -> Option<Date> {
        let field = self.spec_of(name);
        let raw = self.text(name)?;
        match iso_date::parse(&raw) {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(name, FormError::InvalidDate { label: field.label, value: raw });
                None
            }
        }
    }

    fn choice(&mut self, name: &'static str) -> Option<String> {
        let field = self.spec_of(name);
        let raw = self.text(name)?;
        let db = self.db;
        let known = match field.input {
            InputKind::Select { choices, .. } => match choices {
                Choices::PropertyKinds => PropertyKind::from_form_value(&raw).is_some(),
                Choices::Properties => db.property_by_id(&EntityId::from(raw.as_str())).is_some(),
                Choices::Tenants => db.tenant_by_id(&EntityId::from(raw.as_str())).is_some(),
            },
            _ => true,
        };
        if known {
            Some(raw)
        } else {
            self.fail(name, FormError::InvalidChoice { label: field.label, value: raw });
            None
        }
    }
}

fn read_property(r: &mut Reader<'_>) -> Option<NewProperty> {
    let code = r.text("codigo");
    let kind = r.choice("tipo").and_then(|t| PropertyKind::from_form_value(&t));
    let name = r.text("nombre");
    let street = r.text("calle");
    let exterior_number = r.text("numExt");
    let interior_number = r.text("numInt");
    let neighborhood = r.text("colonia");
    let postal_code = r.text("cp");
    let municipality = r.text("delegacion");
    let city = r.text("ciudad");
    let state = r.text("estado");
    let bedrooms = r.count("recamaras");
    let bathrooms = r.number("banos").map(|n| n as f32);
    let parking_spaces = r.count("estacionamientos");
    let floor_area = r.number("m2construccion");
    let rent = r.number("renta");
    let deposit = r.number("deposito");
    let maintenance_fee = r.number("mantenimiento");

    Some(NewProperty {
        code: code?,
        kind: kind?,
        name,
        street: street?,
        exterior_number: exterior_number?,
        interior_number,
        neighborhood: neighborhood?,
        postal_code: postal_code?,
        municipality: municipality?,
        city: city?,
        state: state?,
        bedrooms,
        bathrooms,
        parking_spaces,
        floor_area,
        rent: rent?,
        deposit,
        maintenance_fee,
    })
}

fn read_tenant(r: &mut Reader<'_>) -> Option<NewTenant> {
    let first_name = r.text("nombre");
    let paternal_surname = r.text("apellidoPaterno");
    let maternal_surname = r.text("apellidoMaterno");
    let birth_date = r.date("fechaNacimiento");
    let rfc = r.text("rfc").map(|v| v.to_uppercase());
    let curp = r.text("curp").map(|v| v.to_uppercase());
    let ine = r.text("ine");
    let phone = r.text("telefono");
    let email = r.text("email");
    let occupation = r.text("ocupacion");
    let employer = r.text("empresa");
    let monthly_income = r.number("ingresoMensual");
    let reference_phone = r.text("ref1Telefono");
    let references = r
        .text("ref1Nombre")
        .map(|name| Reference {
            name,
            phone: reference_phone,
        })
        .into_iter()
        .collect();

    Some(NewTenant {
        first_name: first_name?,
        paternal_surname: paternal_surname?,
        maternal_surname,
        birth_date,
        rfc,
        curp,
        ine,
        phone: phone?,
        email: email?,
        occupation,
        employer,
        monthly_income,
        references,
    })
}

fn read_contract(r: &mut Reader<'_>) -> Option<NewContract> {
    let property_id = r.choice("propiedad");
    let tenant_id = r.choice("inquilino");
    let start_date = r.date("fechaInicio");
    let end_date = r.date("fechaTermino");
    let rent = r.number("montoRenta");
    let deposit = r.number("deposito");
    let payment_day = r.number("diaPago").map(|d| d as u8).unwrap_or(1);

    Some(NewContract {
        property_id: property_id?.into(),
        tenant_id: tenant_id?.into(),
        start_date: start_date?,
        end_date: end_date?,
        rent: rent?,
        deposit: deposit?,
        payment_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn tenant_data() -> FormData {
        [
            ("nombre", "Juan"),
            ("apellidoPaterno", "Pérez"),
            ("telefono", "5551234"),
            ("email", "juan@x.com"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn tenant_form_builds_record() {
        let Submission::Tenant(tenant) = parse(FormKind::Tenant, &tenant_data(), &Database::default()).unwrap()
        else {
            panic!("expected a tenant");
        };
        assert_eq!(tenant.display_name(), "Juan Pérez");
        assert_eq!(tenant.phone, "5551234");
        assert!(tenant.references.is_empty());
        assert_eq!(tenant.birth_date, None);
    }

    #[test]
    fn every_problem_is_reported() {
        let mut data = tenant_data();
        data.set("nombre", "   ");
        data.set("email", "");
        data.set("fechaNacimiento", "31/12/1990");
        data.set("ingresoMensual", "mucho");

        let errors = parse(FormKind::Tenant, &data, &Database::default()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("nombre"), Some(&FormError::Missing { label: "Nombre(s)" }));
        assert!(matches!(errors.get("email"), Some(FormError::Missing { .. })));
        assert!(matches!(errors.get("fechaNacimiento"), Some(FormError::InvalidDate { .. })));
        assert!(matches!(errors.get("ingresoMensual"), Some(FormError::InvalidNumber { .. })));
    }

    #[test]
    fn property_numbers_respect_ranges_and_steps() {
        let mut data: FormData = [
            ("codigo", "P-01"),
            ("tipo", "departamento"),
            ("calle", "Reforma"),
            ("numExt", "120"),
            ("colonia", "Centro"),
            ("cp", "06000"),
            ("delegacion", "Cuauhtémoc"),
            ("ciudad", "CDMX"),
            ("estado", "CDMX"),
            ("renta", "12500"),
            ("banos", "1.5"),
        ]
        .into_iter()
        .collect();
        let db = Database::default();

        let Ok(Submission::Property(property)) = parse(FormKind::Property, &data, &db) else {
            panic!("expected a property");
        };
        assert_eq!(property.kind, PropertyKind::Apartment);
        assert_eq!(property.bathrooms, Some(1.5));
        assert_eq!(property.name, None);

        data.set("banos", "1.25");
        data.set("recamaras", "-1");
        data.set("tipo", "castillo");
        let errors = parse(FormKind::Property, &data, &db).unwrap_err();
        assert!(matches!(errors.get("banos"), Some(FormError::InvalidNumber { .. })));
        assert!(matches!(errors.get("recamaras"), Some(FormError::OutOfRange { .. })));
        assert!(matches!(errors.get("tipo"), Some(FormError::InvalidChoice { .. })));
    }

    #[test]
    fn contract_requires_existing_records() {
        let mut data = FormData::with_defaults(FormKind::Contract);
        assert_eq!(data.raw("diaPago"), "1");
        data.set("propiedad", "PROP-missing");
        data.set("inquilino", "TEN-missing");
        data.set("fechaInicio", "2026-11-01");
        data.set("fechaTermino", "2027-10-31");
        data.set("montoRenta", "9000");
        data.set("deposito", "9000");

        let errors = parse(FormKind::Contract, &data, &Database::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors.get("propiedad"), Some(FormError::InvalidChoice { .. })));

        data.set("diaPago", "32");
        let errors = parse(FormKind::Contract, &data, &Database::default()).unwrap_err();
        assert!(matches!(errors.get("diaPago"), Some(FormError::OutOfRange { .. })));
        assert_eq!(iso_date::parse(data.raw("fechaInicio")).ok(), Some(date!(2026 - 11 - 01)));
    }
}
