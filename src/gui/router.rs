use tracing::debug;

/// One named, renderable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    Properties,
    Tenants,
    Contracts,
    Payments,
    Maintenance,
    Services,
    Reports,
    Settings,
    More,
}

impl View {
    pub const ALL: [View; 10] = [
        View::Dashboard,
        View::Properties,
        View::Tenants,
        View::Contracts,
        View::Payments,
        View::Maintenance,
        View::Services,
        View::Reports,
        View::Settings,
        View::More,
    ];

    /// Entries of the side drawer, in display order.
    pub const SIDEBAR: [View; 9] = [
        View::Dashboard,
        View::Properties,
        View::Tenants,
        View::Contracts,
        View::Payments,
        View::Maintenance,
        View::Services,
        View::Reports,
        View::Settings,
    ];

    /// Entries of the bottom tab bar.
    pub const BOTTOM_BAR: [View; 5] = [
        View::Dashboard,
        View::Properties,
        View::Tenants,
        View::Payments,
        View::More,
    ];

    pub fn route(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Properties => "properties",
            View::Tenants => "tenants",
            View::Contracts => "contracts",
            View::Payments => "payments",
            View::Maintenance => "maintenance",
            View::Services => "services",
            View::Reports => "reports",
            View::Settings => "settings",
            View::More => "more",
        }
    }

    /// Resolves a route name. Anything unknown lands on the dashboard.
    pub fn from_route(route: &str) -> View {
        let route = route.trim().trim_start_matches('#');
        match View::ALL.into_iter().find(|view| view.route() == route) {
            Some(view) => view,
            None => {
                debug!(route, "unknown route; falling back to dashboard");
                View::Dashboard
            }
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Properties => "Propiedades",
            View::Tenants => "Inquilinos",
            View::Contracts => "Contratos",
            View::Payments => "Pagos",
            View::Maintenance => "Mantenimiento",
            View::Services => "Servicios",
            View::Reports => "Reportes",
            View::Settings => "Configuración",
            View::More => "Más",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            View::Dashboard => "home",
            View::Properties => "building",
            View::Tenants => "users",
            View::Contracts => "file-contract",
            View::Payments => "dollar-sign",
            View::Maintenance => "tools",
            View::Services => "bolt",
            View::Reports => "chart-bar",
            View::Settings => "cog",
            View::More => "ellipsis-h",
        }
    }
}

/// Browser-like navigation history.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<View>,
    cursor: Option<usize>,
}

impl History {
    /// Records `view` after the current entry, discarding any forward entries.
    pub fn push(&mut self, view: View) {
        match self.cursor {
            Some(cursor) => self.entries.truncate(cursor + 1),
            None => self.entries.clear(),
        }
        self.entries.push(view);
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn back(&mut self) -> Option<View> {
        let cursor = self.cursor.filter(|c| *c > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor).copied()
    }

    pub fn forward(&mut self) -> Option<View> {
        let cursor = self.cursor? + 1;
        let view = self.entries.get(cursor).copied()?;
        self.cursor = Some(cursor);
        Some(view)
    }

    pub fn current(&self) -> Option<View> {
        self.entries.get(self.cursor?).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    current: View,
    history: History,
    sidebar_open: bool,
    scroll_top: u32,
}

impl Router {
    /// Makes `view` current. `push` records a history entry; restoring a
    /// previous entry passes `false`.
    pub fn navigate(&mut self, view: View, push: bool) {
        debug!(from = self.current.route(), to = view.route(), push, "navigate");
        self.current = view;
        if push {
            self.history.push(view);
        }
        self.sidebar_open = false;
        self.scroll_top = 0;
    }

    pub fn back(&mut self) -> Option<View> {
        let view = self.history.back()?;
        self.navigate(view, false);
        Some(view)
    }

    pub fn forward(&mut self) -> Option<View> {
        let view = self.history.forward()?;
        self.navigate(view, false);
        Some(view)
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, offset: u32) {
        self.scroll_top = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_routes_fall_back_to_dashboard() {
        assert_eq!(View::from_route("tenants"), View::Tenants);
        assert_eq!(View::from_route("#contracts"), View::Contracts);
        assert_eq!(View::from_route("insurance"), View::Dashboard);
        assert_eq!(View::from_route(""), View::Dashboard);
    }

    #[test]
    fn routes_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_route(view.route()), view);
        }
    }

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = History::default();
        assert_eq!(history.back(), None);
        history.push(View::Dashboard);
        history.push(View::Tenants);
        history.push(View::Contracts);

        assert_eq!(history.back(), Some(View::Tenants));
        history.push(View::Reports);
        assert_eq!(history.forward(), None);
        assert_eq!(history.len(), 3);
        assert_eq!(history.back(), Some(View::Tenants));
        assert_eq!(history.back(), Some(View::Dashboard));
        assert_eq!(history.back(), None);
        assert_eq!(history.current(), Some(View::Dashboard));
    }

    #[test]
    fn navigation_resets_drawer_and_scroll() {
        let mut router = Router::default();
        router.navigate(View::Dashboard, true);
        router.open_sidebar();
        router.set_scroll_top(480);
        router.navigate(View::Payments, true);

        assert_eq!(router.current(), View::Payments);
        assert!(!router.sidebar_open());
        assert_eq!(router.scroll_top(), 0);

        assert_eq!(router.back(), Some(View::Dashboard));
        assert_eq!(router.history().len(), 2);
        assert_eq!(router.forward(), Some(View::Payments));
        assert_eq!(router.forward(), None);
    }
}
