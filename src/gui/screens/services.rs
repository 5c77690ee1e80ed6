use maud::{Markup, html};

use crate::{
    core::db::{ServiceEntry, Utility, format_money, iso_date},
    gui::{
        message::{Feature, Message},
        router::View,
        screens::Screen,
        widgets::RenderContext,
    },
};

// (properties, monthly total) shown on each utility card.
fn sample_totals(utility: Utility) -> (u32, f64) {
    match utility {
        Utility::Water => (42, 12_450.0),
        Utility::Electricity => (42, 28_900.0),
        Utility::Gas => (38, 8_200.0),
        Utility::Internet => (35, 18_500.0),
    }
}

const SAMPLE_PENDING: [(Utility, &str, &str); 2] = [
    (Utility::Water, "Depto 101", "15 Nov"),
    (Utility::Electricity, "Casa 25", "18 Nov"),
];

fn icon(utility: Utility) -> &'static str {
    match utility {
        Utility::Water => "tint",
        Utility::Electricity => "bolt",
        Utility::Gas => "fire",
        Utility::Internet => "wifi",
    }
}

pub struct ServicesScreen;

impl Screen for ServicesScreen {
    const VIEW: View = View::Services;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let services = ctx.db.services();
        let stored: Vec<(Utility, &ServiceEntry)> = Utility::ALL
            .into_iter()
            .flat_map(|u| services.entries(u).iter().map(move |e| (u, e)))
            .filter(|(_, e)| !e.paid)
            .collect();

        html! {
            h2.mobile-page-title { "Gestión de Servicios" }
            div.mobile-service-grid {
                @for utility in Utility::ALL {
                    @let (properties, total) = sample_totals(utility);
                    div.mobile-card.mobile-service-card
                        data-bind=(ctx.on_click(Message::Unavailable(Feature::ServiceDetails(utility)))) {
                        div.mobile-service-name {
                            i class={ "fas fa-" (icon(utility)) } {}
                            div { (utility.label()) }
                        }
                        div.mobile-service-count { (properties) " propiedades" }
                        div.mobile-service-total { (format_money(total)) }
                        div.mobile-service-caption { "Total mensual" }
                    }
                }
            }
            div.mobile-card {
                div.mobile-card-header {
                    h3.mobile-card-title { "Pagos de Servicios Pendientes" }
                }
                @if stored.is_empty() {
                    @for (utility, property, due) in SAMPLE_PENDING {
                        (pending_row(ctx, utility, property, due))
                    }
                } @else {
                    @for (utility, entry) in &stored {
                        (pending_row(ctx, *utility, &entry.property, &iso_date::format(entry.due_date)))
                    }
                }
            }
        }
    }
}

fn pending_row(ctx: &RenderContext<'_>, utility: Utility, property: &str, due: &str) -> Markup {
    html! {
        div.mobile-service-pending {
            i class={ "fas fa-" (icon(utility)) } {}
            div {
                div.mobile-service-pending-title { (utility.label()) " - " (property) }
                div.mobile-service-pending-due { "Vence: " (due) }
            }
            button.mobile-btn.mobile-btn-primary
                data-bind=(ctx.on_click(Message::Unavailable(Feature::PayService(utility)))) {
                "Pagar"
            }
        }
    }
}
