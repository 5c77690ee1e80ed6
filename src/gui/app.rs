use std::{sync::Arc, time::Duration};

use maud::{DOCTYPE, Markup, html};
use tracing::{debug, error, info, warn};

use crate::{
    config::CurrentUser,
    core::db::{
        Clock, ContractRepository, KeyValueStorage, NotificationRepository, PropertyRepository,
        ReportRepository, Store, SystemClock, TenantRepository,
    },
    gui::{
        AppState,
        forms::{self, Submission},
        message::{Message, ModalId, Task},
        router::View,
        screens::{self, modal},
        state::{Confirm, ToastLevel},
        widgets::{Page, RenderContext, bottom_nav, header, sidebar},
    },
};

pub const REFRESH_DELAY: Duration = Duration::from_secs(1);
pub const REPORT_DELAY: Duration = Duration::from_secs(2);
pub const LOGOUT_DELAY: Duration = Duration::from_secs(1);

const SAVE_FAILED: &str = "Error al guardar los datos";

/// How [`MegaApp::run_until_idle`] honours delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep until each message is due.
    RealTime,
    /// Deliver messages in due order without waiting.
    Immediate,
}

/// The application: store, UI state and the update function that ties them.
pub struct MegaApp<S> {
    store: Store<S>,
    state: AppState,
    user: CurrentUser,
    clock: Arc<dyn Clock>,
}

impl<S> std::fmt::Debug for MegaApp<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MegaApp")
            .field("view", &self.state.router.current())
            .field("modals", &self.state.modals.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl<S: KeyValueStorage> MegaApp<S> {
    /// Starts on the dashboard with whatever the store loaded.
    pub fn new(store: Store<S>, user: CurrentUser) -> Self {
        let mut state = AppState::default();
        state.router.navigate(View::Dashboard, true);
        info!(
            properties = store.database().properties().len(),
            tenants = store.database().tenants().len(),
            contracts = store.database().contracts().len(),
            "application started"
        );
        Self {
            store,
            state,
            user,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.store.set_clock(clock.clone());
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store<S> {
        &mut self.store
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn current_view(&self) -> View {
        self.state.router.current()
    }

    pub async fn update(&mut self, message: Message) -> Task {
        debug!(?message, "update");
        match message {
            Message::Navigate(view) => {
                self.state.router.navigate(view, true);
                Task::none()
            }
            Message::Route(route) => {
                self.state.router.navigate(View::from_route(&route), true);
                Task::none()
            }
            Message::Back => {
                self.state.router.back();
                Task::none()
            }
            Message::Forward => {
                self.state.router.forward();
                Task::none()
            }
            Message::ToggleSidebar => {
                self.state.router.toggle_sidebar();
                Task::none()
            }
            Message::OpenSidebar => {
                self.state.router.open_sidebar();
                Task::none()
            }
            Message::CloseSidebar => {
                self.state.router.close_sidebar();
                Task::none()
            }
            Message::OpenModal(kind) => {
                let id = self.state.open_modal(kind);
                debug!(%id, kind = kind.as_str(), "modal open");
                Task::none()
            }
            Message::CloseModal(id) => self.state.close_modal(id),
            Message::RemoveModal(id) => {
                self.state.remove_modal(id);
                Task::none()
            }
            Message::FieldInput { modal, field, value } => {
                if let Some(modal) = self.state.modal_mut(modal) {
                    modal.errors.clear(&field);
                    modal.data.set(field, value);
                }
                Task::none()
            }
            Message::Save(id) => self.save(id).await,
            Message::DismissToast(id) => {
                self.state.dismiss_toast(id);
                Task::none()
            }
            Message::Refresh => Task::batch([
                self.state.show_toast("Actualizando...", ToastLevel::Info),
                Task::delay(REFRESH_DELAY, Message::Refreshed),
            ]),
            Message::Refreshed => {
                debug!(view = self.current_view().route(), "re-rendered");
                self.state.show_toast("Actualizado", ToastLevel::Success)
            }
            Message::ShowNotifications => {
                let unread = self.store.database().unread_notifications();
                let text = match unread {
                    0 => "Sin notificaciones nuevas".to_string(),
                    1 => "1 nueva notificación".to_string(),
                    n => format!("{n} nuevas notificaciones"),
                };
                self.state.show_toast(text, ToastLevel::Info)
            }
            Message::ShowProfile => {
                self.state.router.navigate(View::Settings, true);
                Task::none()
            }
            Message::GenerateReport(kind) => Task::batch([
                self.state.show_toast(
                    format!("Generando {}...", kind.label().to_lowercase()),
                    ToastLevel::Info,
                ),
                Task::delay(REPORT_DELAY, Message::ReportReady(kind)),
            ]),
            Message::ReportReady(kind) => {
                self.store.database_mut().add_report(kind, self.clock.now());
                if self.persist().await {
                    self.state.show_toast("Reporte generado exitosamente", ToastLevel::Success)
                } else {
                    self.state.show_toast(SAVE_FAILED, ToastLevel::Error)
                }
            }
            Message::Logout => {
                self.state.confirm = Some(Confirm {
                    message: "¿Estás seguro de cerrar sesión?".into(),
                    on_accept: Message::LogoutConfirmed,
                });
                Task::none()
            }
            Message::AcceptConfirm => match self.state.confirm.take() {
                Some(confirm) => Task::done(confirm.on_accept),
                None => Task::none(),
            },
            Message::DismissConfirm => {
                self.state.confirm = None;
                Task::none()
            }
            Message::LogoutConfirmed => Task::batch([
                self.state.show_toast("Cerrando sesión...", ToastLevel::Info),
                Task::delay(LOGOUT_DELAY, Message::Reload),
            ]),
            Message::Reload => {
                info!("reloading");
                self.store.reload().await;
                self.state.reset();
                self.state.router.navigate(View::Dashboard, true);
                Task::none()
            }
            Message::Online => {
                self.state.online = true;
                self.state.show_toast("Conexión restaurada", ToastLevel::Success)
            }
            Message::Offline => {
                self.state.online = false;
                self.state.show_toast("Sin conexión a internet", ToastLevel::Warning)
            }
            Message::Unavailable(feature) => {
                debug!(?feature, "unavailable feature");
                self.state.show_toast(
                    format!("{}: disponible próximamente", feature.describe()),
                    ToastLevel::Info,
                )
            }
        }
    }

    async fn save(&mut self, id: ModalId) -> Task {
        let Some(modal) = self.state.modal(id).filter(|m| !m.closing) else {
            warn!(%id, "save for a modal that is not open");
            return Task::none();
        };
        let kind = modal.kind;

        let submission = match forms::parse(kind, &modal.data, self.store.database()) {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(%id, errors = errors.len(), "form rejected");
                if let Some(modal) = self.state.modal_mut(id) {
                    modal.errors = errors;
                }
                return self
                    .state
                    .show_toast("Completa los campos requeridos", ToastLevel::Warning);
            }
        };

        let now = self.clock.now();
        let db = self.store.database_mut();
        match submission {
            Submission::Property(property) => {
                db.add_property(property, now);
            }
            Submission::Tenant(tenant) => {
                db.add_tenant(tenant, now);
            }
            Submission::Contract(contract) => {
                db.add_contract(contract, now);
            }
        }

        let toast = if self.persist().await {
            self.state.show_toast(kind.success_message(), ToastLevel::Success)
        } else {
            self.state.show_toast(SAVE_FAILED, ToastLevel::Error)
        };
        let close = self.state.close_modal(id);
        self.state.router.navigate(kind.list_view(), true);
        Task::batch([close, toast])
    }

    /// Writes the snapshot; failures are logged and reported as `false`.
    async fn persist(&mut self) -> bool {
        match self.store.save().await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to save data");
                false
            }
        }
    }

    /// Delivers `task` and everything it schedules, in due order, until
    /// nothing is left.
    pub async fn run_until_idle(&mut self, task: Task, pacing: Pacing) {
        let started = tokio::time::Instant::now();
        let mut pending = Vec::new();
        let mut sequence = 0u64;
        schedule(&mut pending, &mut sequence, Duration::ZERO, task);

        while let Some(index) = pending
            .iter()
            .enumerate()
            .min_by_key(|(_, s): &(usize, &Scheduled)| (s.due, s.sequence))
            .map(|(i, _)| i)
        {
            let next = pending.swap_remove(index);
            if pacing == Pacing::RealTime {
                tokio::time::sleep_until(started + next.due).await;
            }
            let follow_up = self.update(next.message).await;
            schedule(&mut pending, &mut sequence, next.due, follow_up);
        }
    }

    /// The whole page: shell, current screen and overlays.
    pub fn view(&self) -> Page {
        let ctx = self.context();
        let state = &self.state;
        let unread = ctx.db.unread_notifications();
        let markup = html! {
            (DOCTYPE)
            html lang="es" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1, viewport-fit=cover";
                    title { "MEGA Property Management" }
                }
                body.offline[!state.online] {
                    (header(&ctx, unread))
                    (sidebar(&ctx, state.router.sidebar_open()))
                    main.mobile-content id="mobileContent" data-scroll-top=(state.router.scroll_top()) {
                        (screens::render(ctx.view, &ctx))
                    }
                    (bottom_nav(&ctx))
                    @for open in &state.modals {
                        (modal::modal(&ctx, open))
                    }
                    (modal::toast(state.toast.as_ref()))
                    @if let Some(confirm) = &state.confirm {
                        (modal::confirm(&ctx, confirm))
                    }
                }
            }
        };
        finish(ctx, markup)
    }

    /// Just the content region of the current view.
    pub fn render_content(&self) -> Page {
        let ctx = self.context();
        let markup = screens::render(ctx.view, &ctx);
        finish(ctx, markup)
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(self.store.database(), &self.user, self.current_view())
    }
}

fn finish(ctx: RenderContext<'_>, markup: Markup) -> Page {
    Page {
        markup,
        bindings: ctx.into_bindings(),
    }
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    sequence: u64,
    message: Message,
}

fn schedule(pending: &mut Vec<Scheduled>, sequence: &mut u64, now: Duration, task: Task) {
    let mut push = |due: Duration, message: Message| {
        pending.push(Scheduled {
            due,
            sequence: *sequence,
            message,
        });
        *sequence += 1;
    };
    match task {
        Task::None => {}
        Task::Done(message) => push(now, message),
        Task::Delay(after, message) => push(now + after, message),
        Task::Batch(tasks) => {
            for task in tasks {
                schedule(pending, sequence, now, task);
            }
        }
    }
}
