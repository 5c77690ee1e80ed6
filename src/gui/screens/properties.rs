use maud::{Markup, html};

use crate::{
    core::db::{Property, PropertyRepository, format_money},
    gui::{
        forms::FormKind,
        message::Message,
        router::View,
        screens::Screen,
        widgets::{RenderContext, badge, empty_state, filter_tabs, list_item, primary_button, search_bar},
    },
};

const FILTERS: [(&str, &str); 4] = [
    ("all", "Todas"),
    ("available", "Disponibles"),
    ("occupied", "Ocupadas"),
    ("maintenance", "Mantenimiento"),
];

pub struct PropertiesScreen;

impl Screen for PropertiesScreen {
    const VIEW: View = View::Properties;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let properties = ctx.db.properties();
        html! {
            (search_bar(ctx, "Buscar propiedades..."))
            (filter_tabs(ctx, &FILTERS))
            div.mobile-list id="propertiesList" {
                @for property in properties {
                    (property_card(ctx, property))
                }
                @if properties.is_empty() {
                    (empty_state("No hay propiedades registradas"))
                }
            }
            (primary_button(ctx, "plus", "Agregar Propiedad", Message::OpenModal(FormKind::Property)))
        }
    }
}

fn features(property: &Property) -> String {
    let mut parts = vec![property.kind.label().to_string()];
    if let Some(bedrooms) = property.bedrooms {
        parts.push(format!("{bedrooms} rec"));
    }
    if let Some(bathrooms) = property.bathrooms {
        parts.push(format!("{bathrooms} baños"));
    }
    if let Some(area) = property.floor_area {
        parts.push(format!("{area} m²"));
    }
    parts.join(" • ")
}

fn property_card(ctx: &RenderContext<'_>, property: &Property) -> Markup {
    list_item(
        ctx,
        html! { div.mobile-property-thumb {} },
        html! {
            div.mobile-list-item-title { (property.display_name()) }
            div.mobile-list-item-subtitle { (features(property)) }
            div.mobile-list-item-meta {
                (badge(property.status.as_str(), property.status.label()))
                span.mobile-price { (format_money(property.rent)) "/mes" }
            }
        },
    )
}
