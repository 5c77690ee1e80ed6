use std::{fmt, time::Duration};

use crate::{
    core::db::{ReportKind, Utility},
    gui::{forms::FormKind, router::View, state::ToastId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(pub(crate) u64);

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal-{}", self.0)
    }
}

/// Controls that are drawn but have no behaviour behind them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Search(View),
    Filter(View, &'static str),
    Details(View),
    ViewAll,
    PaymentForm,
    MaintenanceForm,
    SendReminders,
    ServiceDetails(Utility),
    PayService(Utility),
    DownloadReport,
    EditProfile,
    SettingsSection(&'static str),
}

impl Feature {
    pub fn describe(self) -> String {
        match self {
            Feature::Search(view) => format!("Búsqueda en {}", view.title()),
            Feature::Filter(view, filter) => format!("Filtro \"{filter}\" en {}", view.title()),
            Feature::Details(view) => format!("Detalle de {}", view.title()),
            Feature::ViewAll => "Historial de actividad".into(),
            Feature::PaymentForm => "Registro de pagos".into(),
            Feature::MaintenanceForm => "Órdenes de servicio".into(),
            Feature::SendReminders => "Envío de recordatorios".into(),
            Feature::ServiceDetails(utility) => format!("Detalle de {}", utility.label()),
            Feature::PayService(utility) => format!("Pago de {}", utility.label()),
            Feature::DownloadReport => "Descarga de reportes".into(),
            Feature::EditProfile => "Edición de perfil".into(),
            Feature::SettingsSection(section) => format!("Sección {section}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Navigate(View),
    /// Navigation by route name, e.g. from the "more" menu.
    Route(String),
    Back,
    Forward,
    ToggleSidebar,
    OpenSidebar,
    CloseSidebar,
    OpenModal(FormKind),
    CloseModal(ModalId),
    RemoveModal(ModalId),
    FieldInput {
        modal: ModalId,
        field: String,
        value: String,
    },
    Save(ModalId),
    DismissToast(ToastId),
    Refresh,
    Refreshed,
    ShowNotifications,
    ShowProfile,
    GenerateReport(ReportKind),
    ReportReady(ReportKind),
    Logout,
    AcceptConfirm,
    DismissConfirm,
    LogoutConfirmed,
    Reload,
    Online,
    Offline,
    Unavailable(Feature),
}

/// Follow-up work returned by [`MegaApp::update`](crate::gui::MegaApp::update).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Task {
    #[default]
    None,
    Done(Message),
    Delay(Duration, Message),
    Batch(Vec<Task>),
}

impl Task {
    pub fn none() -> Self {
        Task::None
    }

    pub fn done(message: Message) -> Self {
        Task::Done(message)
    }

    pub fn delay(after: Duration, message: Message) -> Self {
        Task::Delay(after, message)
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task>) -> Self {
        let tasks: Vec<Task> = tasks.into_iter().filter(|t| !t.is_none()).collect();
        if tasks.is_empty() {
            Task::None
        } else {
            Task::Batch(tasks)
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Task::None)
    }

    /// Every message this task will eventually deliver, with its delay.
    pub fn scheduled(&self) -> Vec<(Duration, &Message)> {
        match self {
            Task::None => Vec::new(),
            Task::Done(message) => vec![(Duration::ZERO, message)],
            Task::Delay(after, message) => vec![(*after, message)],
            Task::Batch(tasks) => tasks.iter().flat_map(Task::scheduled).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_flattens_nothing_to_none() {
        assert!(Task::batch([Task::none(), Task::none()]).is_none());
        let task = Task::batch([
            Task::none(),
            Task::delay(Duration::from_secs(3), Message::Refresh),
            Task::done(Message::Back),
        ]);
        assert_eq!(
            task.scheduled(),
            vec![
                (Duration::from_secs(3), &Message::Refresh),
                (Duration::ZERO, &Message::Back)
            ]
        );
    }
}
