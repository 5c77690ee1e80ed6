pub mod contracts;
pub mod dashboard;
pub mod maintenance;
pub mod modal;
pub mod more;
pub mod payments;
pub mod properties;
pub mod reports;
pub mod services;
pub mod settings;
pub mod tenants;

use maud::{Markup, html};

use crate::gui::{router::View, widgets::RenderContext};

/// A pure function from the current database to one view's markup.
pub trait Screen {
    const VIEW: View;

    fn view(ctx: &RenderContext<'_>) -> Markup;
}

fn page<S: Screen>(ctx: &RenderContext<'_>) -> Markup {
    html! {
        div.mobile-page data-page=(S::VIEW.route()) {
            (S::view(ctx))
        }
    }
}

/// Renders the content region for `view`.
pub fn render(view: View, ctx: &RenderContext<'_>) -> Markup {
    match view {
        View::Dashboard => page::<dashboard::DashboardScreen>(ctx),
        View::Properties => page::<properties::PropertiesScreen>(ctx),
        View::Tenants => page::<tenants::TenantsScreen>(ctx),
        View::Contracts => page::<contracts::ContractsScreen>(ctx),
        View::Payments => page::<payments::PaymentsScreen>(ctx),
        View::Maintenance => page::<maintenance::MaintenanceScreen>(ctx),
        View::Services => page::<services::ServicesScreen>(ctx),
        View::Reports => page::<reports::ReportsScreen>(ctx),
        View::Settings => page::<settings::SettingsScreen>(ctx),
        View::More => page::<more::MoreScreen>(ctx),
    }
}
