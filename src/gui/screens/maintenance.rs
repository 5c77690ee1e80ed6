use maud::{Markup, html};

use crate::{
    core::db::{MaintenanceKind, MaintenanceOrder, MaintenanceRepository, OrderStatus, Priority},
    gui::{
        message::{Feature, Message},
        router::View,
        screens::Screen,
        widgets::{RenderContext, badge, empty_state, filter_tabs, list_item},
    },
};

const FILTERS: [(&str, &str); 4] = [
    ("all", "Todas"),
    ("urgent", "Urgentes"),
    ("pending", "Pendientes"),
    ("completed", "Completadas"),
];

pub struct MaintenanceScreen;

impl Screen for MaintenanceScreen {
    const VIEW: View = View::Maintenance;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let orders = ctx.db.maintenance_orders();
        let urgent = orders.iter().filter(|o| o.priority == Priority::Urgent).count();
        let pending = orders.iter().filter(|o| o.status == OrderStatus::Pending).count();

        html! {
            div.mobile-stats-grid {
                div.mobile-card.mobile-card-danger {
                    div.mobile-stat-value { (urgent) }
                    div.mobile-stat-label { "Urgentes" }
                    i.fas.fa-exclamation-triangle {}
                }
                div.mobile-card.mobile-card-warning {
                    div.mobile-stat-value { (pending) }
                    div.mobile-stat-label { "Pendientes" }
                    i.fas.fa-clock {}
                }
            }
            button.mobile-btn.mobile-btn-warning
                data-bind=(ctx.on_click(Message::Unavailable(Feature::MaintenanceForm))) {
                i.fas.fa-tools {} " Nueva Orden de Servicio"
            }
            (filter_tabs(ctx, &FILTERS))
            div.mobile-list {
                @for order in orders {
                    (order_card(ctx, order))
                }
                @if orders.is_empty() {
                    (empty_state("No hay órdenes de mantenimiento"))
                }
            }
        }
    }
}

fn order_card(ctx: &RenderContext<'_>, order: &MaintenanceOrder) -> Markup {
    let icon = match order.kind {
        MaintenanceKind::Plumbing => "tint",
        MaintenanceKind::Electrical => "bolt",
        MaintenanceKind::General => "tools",
    };
    list_item(
        ctx,
        html! {
            div class={ "mobile-status-icon mobile-priority-" (order.priority.as_str()) } {
                i class={ "fas fa-" (icon) } {}
            }
        },
        html! {
            div.mobile-list-item-title { (order.title) }
            div.mobile-list-item-subtitle { (order.property) }
            div.mobile-list-item-meta {
                (badge(order.priority.as_str(), order.priority.label()))
                span { (order.technician.as_deref().unwrap_or("Sin asignar")) }
            }
        },
    )
}
