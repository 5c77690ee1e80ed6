//! Rendering context, event bindings and the components shared by screens.
//!
//! Markup never carries handler code. Every interactive element gets a
//! `data-bind="<n>"` attribute and the [`Bindings`] table returned next to
//! the markup says what `n` does; a host attaches listeners from that table.

use std::cell::RefCell;

use maud::{Markup, Render, html};

use crate::{
    config::CurrentUser,
    core::db::Database,
    gui::{
        message::{Feature, Message, ModalId},
        router::View,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u32);

impl BindingId {
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }
}

impl Render for BindingId {
    fn render_to(&self, buffer: &mut String) {
        self.0.render_to(buffer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Click,
    Input,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dispatch(Message),
    /// Copies the element's value into a modal's form data.
    FieldInput { modal: ModalId, field: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub event: Event,
    pub action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct Bindings(Vec<Binding>);

impl Bindings {
    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.0.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, b)| (BindingId(i as u32), b))
    }

    /// The message an event on `id` produces. `value` is the element's
    /// current value for input bindings.
    pub fn resolve(&self, id: BindingId, value: Option<&str>) -> Option<Message> {
        match &self.get(id)?.action {
            Action::Dispatch(message) => Some(message.clone()),
            Action::FieldInput { modal, field } => Some(Message::FieldInput {
                modal: *modal,
                field: field.to_string(),
                value: value.unwrap_or_default().to_string(),
            }),
        }
    }

    /// First element that dispatches `message` when clicked.
    pub fn find(&self, message: &Message) -> Option<BindingId> {
        self.iter()
            .find(|(_, b)| matches!(&b.action, Action::Dispatch(m) if m == message))
            .map(|(id, _)| id)
    }
}

/// Everything a screen needs to draw itself.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub db: &'a Database,
    pub user: &'a CurrentUser,
    pub view: View,
    bindings: RefCell<Vec<Binding>>,
}

impl<'a> RenderContext<'a> {
    pub fn new(db: &'a Database, user: &'a CurrentUser, view: View) -> Self {
        Self {
            db,
            user,
            view,
            bindings: RefCell::new(Vec::new()),
        }
    }

    fn bind(&self, event: Event, action: Action) -> BindingId {
        let mut bindings = self.bindings.borrow_mut();
        bindings.push(Binding { event, action });
        BindingId((bindings.len() - 1) as u32)
    }

    pub fn on_click(&self, message: Message) -> BindingId {
        self.bind(Event::Click, Action::Dispatch(message))
    }

    pub fn on_input(&self, modal: ModalId, field: &'static str) -> BindingId {
        self.bind(Event::Input, Action::FieldInput { modal, field })
    }

    pub fn into_bindings(self) -> Bindings {
        Bindings(self.bindings.into_inner())
    }
}

/// Rendered markup plus the event table its `data-bind` ids index into.
#[derive(Debug, Clone)]
pub struct Page {
    pub markup: Markup,
    pub bindings: Bindings,
}

impl Page {
    pub fn html(&self) -> &str {
        &self.markup.0
    }

    pub fn into_string(self) -> String {
        self.markup.into_string()
    }
}

pub fn empty_state(text: &str) -> Markup {
    html! {
        div.mobile-empty-state {
            i.fas.fa-inbox {}
            p { (text) }
        }
    }
}

pub fn stat_card(value: impl Render, label: &str) -> Markup {
    html! {
        div.mobile-stat-card {
            div.mobile-stat-value { (value) }
            div.mobile-stat-label { (label) }
        }
    }
}

pub fn search_bar(ctx: &RenderContext<'_>, placeholder: &str) -> Markup {
    html! {
        div.mobile-search {
            i.fas.fa-search.mobile-search-icon {}
            input.mobile-search-input type="text" placeholder=(placeholder)
                data-bind=(ctx.on_click(Message::Unavailable(Feature::Search(ctx.view))));
        }
    }
}

/// Filter tabs; the first one is drawn as selected.
pub fn filter_tabs(ctx: &RenderContext<'_>, tabs: &[(&'static str, &'static str)]) -> Markup {
    html! {
        div.mobile-tabs {
            @for (index, (filter, label)) in tabs.iter().enumerate() {
                button.mobile-tab.active[index == 0]
                    data-bind=(ctx.on_click(Message::Unavailable(Feature::Filter(ctx.view, *filter)))) {
                    (label)
                }
            }
        }
    }
}

/// A tappable row that opens the (not yet available) detail screen.
pub fn list_item(ctx: &RenderContext<'_>, leading: Markup, body: Markup) -> Markup {
    html! {
        div.mobile-list-item data-bind=(ctx.on_click(Message::Unavailable(Feature::Details(ctx.view)))) {
            (leading)
            div.mobile-list-item-content { (body) }
            i.fas.fa-chevron-right.mobile-list-item-action {}
        }
    }
}

pub fn badge(class: &str, text: &str) -> Markup {
    html! { span class={ "mobile-badge mobile-badge-" (class) } { (text) } }
}

pub fn primary_button(ctx: &RenderContext<'_>, icon: &str, label: &str, message: Message) -> Markup {
    html! {
        div.mobile-page-actions {
            button.mobile-btn.mobile-btn-primary data-bind=(ctx.on_click(message)) {
                i class={ "fas fa-" (icon) } {} " " (label)
            }
        }
    }
}

fn nav_item(ctx: &RenderContext<'_>, class: &str, view: View) -> Markup {
    html! {
        a class={ (class) @if view == ctx.view { " active" } } data-view=(view.route())
            data-bind=(ctx.on_click(Message::Navigate(view))) {
            i class={ "fas fa-" (view.icon()) } {}
            span { (view.title()) }
        }
    }
}

/// Side drawer with one entry per top-level view.
pub fn sidebar(ctx: &RenderContext<'_>, open: bool) -> Markup {
    html! {
        div.mobile-sidebar-overlay.active[open] data-bind=(ctx.on_click(Message::CloseSidebar)) {}
        nav.mobile-sidebar.active[open] id="mobileSidebar" {
            div.mobile-sidebar-header {
                div.mobile-sidebar-user { (ctx.user.name) }
                div.mobile-sidebar-email { (ctx.user.email) }
            }
            @for view in View::SIDEBAR {
                (nav_item(ctx, "mobile-nav-item", view))
            }
            a.mobile-nav-item.mobile-nav-logout data-bind=(ctx.on_click(Message::Logout)) {
                i.fas.fa-sign-out-alt {}
                span { "Cerrar Sesión" }
            }
        }
    }
}

pub fn bottom_nav(ctx: &RenderContext<'_>) -> Markup {
    html! {
        nav.mobile-bottom-nav {
            @for view in View::BOTTOM_BAR {
                (nav_item(ctx, "mobile-bottom-nav-item", view))
            }
        }
    }
}

pub fn header(ctx: &RenderContext<'_>, unread: usize) -> Markup {
    html! {
        header.mobile-header {
            button.mobile-header-btn aria-label="Menú" data-bind=(ctx.on_click(Message::ToggleSidebar)) {
                i.fas.fa-bars {}
            }
            h1.mobile-header-title { (ctx.view.title()) }
            button.mobile-header-btn aria-label="Actualizar" data-bind=(ctx.on_click(Message::Refresh)) {
                i.fas.fa-sync-alt {}
            }
            button.mobile-header-btn aria-label="Notificaciones"
                data-bind=(ctx.on_click(Message::ShowNotifications)) {
                i.fas.fa-bell {}
                @if unread > 0 {
                    span.mobile-header-badge { (unread) }
                }
            }
            button.mobile-header-btn aria-label="Perfil" data-bind=(ctx.on_click(Message::ShowProfile)) {
                i.fas.fa-user-circle {}
            }
        }
    }
}
