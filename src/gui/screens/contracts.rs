use maud::{Markup, html};

use crate::{
    core::db::{Contract, ContractRepository, ContractStatus, format_money, iso_date},
    gui::{
        forms::FormKind,
        message::Message,
        router::View,
        screens::Screen,
        widgets::{RenderContext, empty_state, list_item, primary_button, stat_card},
    },
};

pub struct ContractsScreen;

impl Screen for ContractsScreen {
    const VIEW: View = View::Contracts;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let contracts = ctx.db.contracts();
        let active = contracts.iter().filter(|c| c.status == ContractStatus::Active).count();
        let expiring = contracts.iter().filter(|c| c.is_expiring()).count();
        let expired = contracts.iter().filter(|c| c.status == ContractStatus::Expired).count();

        html! {
            div.mobile-stats-grid.mobile-stats-grid-3 {
                (stat_card(active, "Activos"))
                (stat_card(expiring, "Por vencer"))
                (stat_card(expired, "Vencidos"))
            }
            div.mobile-list {
                @for contract in contracts {
                    (contract_card(ctx, contract))
                }
                @if contracts.is_empty() {
                    (empty_state("No hay contratos activos"))
                }
            }
            (primary_button(ctx, "file-contract", "Nuevo Contrato", Message::OpenModal(FormKind::Contract)))
        }
    }
}

fn contract_card(ctx: &RenderContext<'_>, contract: &Contract) -> Markup {
    list_item(
        ctx,
        html! {},
        html! {
            div.mobile-list-item-title { "Contrato #" (contract.number) }
            div.mobile-list-item-subtitle { (contract.tenant_name) " • " (contract.property_name) }
            div.mobile-list-item-meta {
                span {
                    i.fas.fa-calendar {} " "
                    (iso_date::format(contract.start_date)) " - " (iso_date::format(contract.end_date))
                }
                span.mobile-price { (format_money(contract.rent)) "/mes" }
            }
        },
    )
}
