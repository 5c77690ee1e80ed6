use maud::{Markup, html};

use crate::{
    core::db::{Payment, PaymentRepository, PaymentStatus, format_money, iso_date},
    gui::{
        message::{Feature, Message},
        router::View,
        screens::Screen,
        widgets::{RenderContext, empty_state, filter_tabs, list_item},
    },
};

/// Figures shown until payments are tracked for real.
struct PaymentStats {
    total_collected: f64,
    paid: u32,
    pending: u32,
    overdue: u32,
}

const SAMPLE_STATS: PaymentStats = PaymentStats {
    total_collected: 485_320.0,
    paid: 38,
    pending: 4,
    overdue: 2,
};

const FILTERS: [(&str, &str); 4] = [
    ("all", "Todos"),
    ("pending", "Pendientes"),
    ("paid", "Pagados"),
    ("overdue", "Vencidos"),
];

pub struct PaymentsScreen;

impl Screen for PaymentsScreen {
    const VIEW: View = View::Payments;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let payments = ctx.db.payments();
        let stats = SAMPLE_STATS;
        html! {
            div.mobile-card.mobile-card-highlight {
                div.mobile-card-caption { "Total cobrado este mes" }
                div.mobile-card-amount { (format_money(stats.total_collected)) }
                div.mobile-card-breakdown {
                    span { i.fas.fa-check-circle {} " " (stats.paid) " Pagados" }
                    span { i.fas.fa-clock {} " " (stats.pending) " Pendientes" }
                    span { i.fas.fa-exclamation-circle {} " " (stats.overdue) " Vencidos" }
                }
            }
            div.mobile-page-actions {
                button.mobile-btn.mobile-btn-success
                    data-bind=(ctx.on_click(Message::Unavailable(Feature::PaymentForm))) {
                    i.fas.fa-plus {} " Registrar Pago"
                }
                button.mobile-btn.mobile-btn-outline
                    data-bind=(ctx.on_click(Message::Unavailable(Feature::SendReminders))) {
                    i.fas.fa-bell {} " Enviar Recordatorios"
                }
            }
            (filter_tabs(ctx, &FILTERS))
            div.mobile-list id="paymentsList" {
                @for payment in payments {
                    (payment_card(ctx, payment))
                }
                @if payments.is_empty() {
                    (empty_state("No hay pagos registrados"))
                }
            }
        }
    }
}

fn payment_card(ctx: &RenderContext<'_>, payment: &Payment) -> Markup {
    let icon = match payment.status {
        PaymentStatus::Paid => "check",
        PaymentStatus::Pending | PaymentStatus::Overdue => "clock",
    };
    list_item(
        ctx,
        html! {
            div class={ "mobile-status-icon mobile-status-" (payment.status.as_str()) } {
                i class={ "fas fa-" (icon) } {}
            }
        },
        html! {
            div.mobile-list-item-title { (payment.tenant) }
            div.mobile-list-item-subtitle { (payment.property) " • " (payment.concept) }
            div.mobile-list-item-meta {
                span.mobile-price { (format_money(payment.amount)) }
                span { (iso_date::format(payment.due_date)) }
                span.mobile-status-label { (payment.status.label()) }
            }
        },
    )
}
