use maud::{Markup, html};

use crate::{
    core::db::{ContractRepository, ContractStatus, Tenant, TenantRepository},
    gui::{
        forms::FormKind,
        message::Message,
        router::View,
        screens::Screen,
        widgets::{RenderContext, empty_state, list_item, primary_button, search_bar},
    },
};

pub struct TenantsScreen;

impl Screen for TenantsScreen {
    const VIEW: View = View::Tenants;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        let tenants = ctx.db.tenants();
        html! {
            (search_bar(ctx, "Buscar inquilinos..."))
            div.mobile-list id="tenantsList" {
                @for tenant in tenants {
                    (tenant_card(ctx, tenant))
                }
                @if tenants.is_empty() {
                    (empty_state("No hay inquilinos registrados"))
                }
            }
            (primary_button(ctx, "user-plus", "Agregar Inquilino", Message::OpenModal(FormKind::Tenant)))
        }
    }
}

/// Property of the tenant's most recent active contract.
fn assigned_property<'a>(ctx: &RenderContext<'a>, tenant: &Tenant) -> Option<&'a str> {
    ctx.db
        .contracts_for_tenant(&tenant.id)
        .into_iter()
        .rev()
        .find(|c| c.status == ContractStatus::Active)
        .map(|c| c.property_name.as_str())
}

fn tenant_card(ctx: &RenderContext<'_>, tenant: &Tenant) -> Markup {
    list_item(
        ctx,
        html! { div.mobile-avatar { (tenant.initial()) } },
        html! {
            div.mobile-list-item-title { (tenant.name) }
            div.mobile-list-item-subtitle {
                (assigned_property(ctx, tenant).unwrap_or("Sin propiedad asignada"))
            }
            div.mobile-list-item-meta {
                i.fas.fa-phone {} " " (tenant.phone)
            }
        },
    )
}
