use std::time::Duration;

use crate::gui::{
    forms::{FieldErrors, FormData, FormKind},
    message::{Message, ModalId, Task},
    router::Router,
};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Exit animation of a closing modal.
pub const MODAL_EXIT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub level: ToastLevel,
}

/// An entity-creation dialog and the values typed into it so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub id: ModalId,
    pub kind: FormKind,
    pub data: FormData,
    pub errors: FieldErrors,
    pub closing: bool,
}

/// A yes/no question blocking the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirm {
    pub message: String,
    pub on_accept: Message,
}

#[derive(Debug)]
pub struct AppState {
    pub router: Router,
    pub modals: Vec<Modal>,
    pub toast: Option<Toast>,
    pub confirm: Option<Confirm>,
    pub online: bool,
    next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            router: Router::default(),
            modals: Vec::new(),
            toast: None,
            confirm: None,
            online: true,
            next_id: 1,
        }
    }
}

impl AppState {
    /// Back to a fresh state. Ids keep counting so timers scheduled before
    /// the reset cannot match anything created after it.
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = Self {
            next_id,
            ..Self::default()
        };
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replaces the current toast and schedules its dismissal.
    pub fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel) -> Task {
        let id = ToastId(self.next_id());
        self.toast = Some(Toast {
            id,
            message: message.into(),
            level,
        });
        Task::delay(TOAST_DURATION, Message::DismissToast(id))
    }

    /// Hides the toast only if it is still the one `id` refers to.
    pub fn dismiss_toast(&mut self, id: ToastId) {
        if self.toast.as_ref().is_some_and(|t| t.id == id) {
            self.toast = None;
        }
    }

    /// Opens a dialog for `kind`, or returns the one already open.
    pub fn open_modal(&mut self, kind: FormKind) -> ModalId {
        if let Some(open) = self.modal_for(kind) {
            return open.id;
        }
        let id = ModalId(self.next_id());
        self.modals.push(Modal {
            id,
            kind,
            data: FormData::with_defaults(kind),
            errors: FieldErrors::default(),
            closing: false,
        });
        id
    }

    /// Starts the exit animation; the modal is removed once it has played.
    pub fn close_modal(&mut self, id: ModalId) -> Task {
        match self.modal_mut(id) {
            Some(modal) if !modal.closing => {
                modal.closing = true;
                Task::delay(MODAL_EXIT, Message::RemoveModal(id))
            }
            _ => Task::none(),
        }
    }

    pub fn remove_modal(&mut self, id: ModalId) {
        self.modals.retain(|m| m.id != id);
    }

    pub fn modal(&self, id: ModalId) -> Option<&Modal> {
        self.modals.iter().find(|m| m.id == id)
    }

    pub fn modal_mut(&mut self, id: ModalId) -> Option<&mut Modal> {
        self.modals.iter_mut().find(|m| m.id == id)
    }

    /// The open (not closing) dialog of `kind`, if any.
    pub fn modal_for(&self, kind: FormKind) -> Option<&Modal> {
        self.modals.iter().find(|m| m.kind == kind && !m.closing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_dismissal_keeps_newer_toast() {
        let mut state = AppState::default();
        let first = state.show_toast("Actualizando...", ToastLevel::Info);
        state.show_toast("Actualizado", ToastLevel::Success);

        let Task::Delay(_, Message::DismissToast(stale)) = first else {
            panic!("toast should schedule its dismissal");
        };
        state.dismiss_toast(stale);
        assert_eq!(state.toast.as_ref().map(|t| t.message.as_str()), Some("Actualizado"));
    }

    #[test]
    fn opening_twice_reuses_the_dialog() {
        let mut state = AppState::default();
        let a = state.open_modal(FormKind::Tenant);
        let b = state.open_modal(FormKind::Tenant);
        assert_eq!(a, b);
        assert_eq!(state.modals.len(), 1);

        assert_eq!(state.close_modal(a), Task::delay(MODAL_EXIT, Message::RemoveModal(a)));
        assert!(state.close_modal(a).is_none());
        assert!(state.modal_for(FormKind::Tenant).is_none());

        let c = state.open_modal(FormKind::Tenant);
        assert_ne!(a, c);
        state.remove_modal(a);
        assert_eq!(state.modals.len(), 1);
    }
}
