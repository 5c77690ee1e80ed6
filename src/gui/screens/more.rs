use maud::{Markup, html};

use crate::gui::{message::Message, router::View, screens::Screen, widgets::RenderContext};

// These routes have no screen of their own and resolve to the dashboard.
const ENTRIES: [(&str, &str, &str); 7] = [
    ("documents", "folder", "Documentos"),
    ("insurance", "shield-alt", "Seguros"),
    ("taxes", "calculator", "Impuestos"),
    ("calendar", "calendar", "Calendario"),
    ("analytics", "chart-bar", "Analytics"),
    ("backup", "database", "Respaldo"),
    ("help", "question-circle", "Ayuda"),
];

pub struct MoreScreen;

impl Screen for MoreScreen {
    const VIEW: View = View::More;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        html! {
            h2.mobile-page-title { "Más Opciones" }
            div.mobile-list {
                @for (route, icon, title) in ENTRIES {
                    div.mobile-list-item data-route=(route)
                        data-bind=(ctx.on_click(Message::Route(route.to_string()))) {
                        i class={ "fas fa-" (icon) } {}
                        div.mobile-list-item-content {
                            div.mobile-list-item-title { (title) }
                        }
                        i.fas.fa-chevron-right.mobile-list-item-action {}
                    }
                }
            }
        }
    }
}
