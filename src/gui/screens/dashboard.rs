use maud::{Markup, html};

use crate::{
    core::db::{PropertyRepository, TenantRepository},
    gui::{
        forms::FormKind,
        message::{Feature, Message},
        router::View,
        screens::Screen,
        widgets::{RenderContext, stat_card},
    },
};

/// Monthly revenue tile; there is no accounting behind it yet.
const SAMPLE_REVENUE: &str = "$485K";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlertLevel {
    Warning,
    Danger,
    Info,
}

impl AlertLevel {
    fn class(self) -> &'static str {
        match self {
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
            AlertLevel::Info => "info",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            AlertLevel::Warning => "exclamation-triangle",
            AlertLevel::Danger => "exclamation-circle",
            AlertLevel::Info => "info-circle",
        }
    }
}

const ALERTS: [(AlertLevel, &str); 3] = [
    (AlertLevel::Warning, "3 pagos están próximos a vencer"),
    (AlertLevel::Danger, "1 contrato vence en 7 días"),
    (AlertLevel::Info, "Mantenimiento programado mañana"),
];

// (icon, title, subtitle, when)
const RECENT_ACTIVITY: [(&str, &str, &str, &str); 3] = [
    ("dollar-sign", "Pago recibido", "Juan Pérez - Depto 101", "Hace 2 horas"),
    ("tools", "Mantenimiento completado", "Reparación de fuga - Casa 25", "Hace 4 horas"),
    ("user-plus", "Nuevo inquilino", "María García - Local 3", "Ayer"),
];

const DAY_SUMMARY: [(&str, u32, &str); 3] = [
    ("Pagos recibidos hoy", 5, "success"),
    ("Mantenimientos pendientes", 3, "warning"),
    ("Contratos por vencer", 2, "danger"),
];

pub struct DashboardScreen;

impl Screen for DashboardScreen {
    const VIEW: View = View::Dashboard;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let db = ctx.db;
        let quick_actions = [
            ("plus", "Propiedad", Message::OpenModal(FormKind::Property)),
            ("user-plus", "Inquilino", Message::OpenModal(FormKind::Tenant)),
            ("dollar-sign", "Pago", Message::Unavailable(Feature::PaymentForm)),
            ("wrench", "Servicio", Message::Unavailable(Feature::MaintenanceForm)),
        ];

        html! {
            h1.mobile-greeting { "Hola, " (ctx.user.name) " 👋" }

            div.mobile-quick-actions {
                @for (icon, label, message) in quick_actions {
                    a.mobile-quick-action data-bind=(ctx.on_click(message)) {
                        i class={ "fas fa-" (icon) } {} " " (label)
                    }
                }
            }

            div.mobile-stats-grid {
                (stat_card(db.properties().len(), "Propiedades"))
                (stat_card(db.tenants().len(), "Inquilinos"))
                (stat_card(format!("{}%", db.occupancy_percent()), "Ocupación"))
                (stat_card(SAMPLE_REVENUE, "Ingresos/mes"))
            }

            div.mobile-alerts {
                @for (level, text) in ALERTS {
                    div class={ "mobile-alert mobile-alert-" (level.class()) } {
                        i class={ "fas fa-" (level.icon()) } {}
                        span { (text) }
                        i.fas.fa-chevron-right {}
                    }
                }
            }

            div.mobile-card {
                div.mobile-card-header {
                    h3.mobile-card-title { "Actividad Reciente" }
                    a.mobile-card-link data-bind=(ctx.on_click(Message::Unavailable(Feature::ViewAll))) {
                        "Ver todo"
                    }
                }
                @for (icon, title, subtitle, when) in RECENT_ACTIVITY {
                    div.mobile-activity {
                        div.mobile-activity-icon { i class={ "fas fa-" (icon) } {} }
                        div.mobile-activity-body {
                            div.mobile-activity-title { (title) }
                            div.mobile-activity-subtitle { (subtitle) }
                        }
                        div.mobile-activity-time { (when) }
                    }
                }
            }

            div.mobile-card {
                div.mobile-card-header {
                    h3.mobile-card-title { "Resumen del Día" }
                }
                @for (label, value, tone) in DAY_SUMMARY {
                    div.mobile-summary-row {
                        span { (label) }
                        strong class={ "text-" (tone) } { (value) }
                    }
                }
            }
        }
    }
}
