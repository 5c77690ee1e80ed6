mod app;
pub mod forms;
pub mod message;
pub mod router;
pub mod screens;
pub mod state;
pub mod widgets;

pub use app::{LOGOUT_DELAY, MegaApp, Pacing, REFRESH_DELAY, REPORT_DELAY};
pub use forms::{FormData, FormKind};
pub use message::{Feature, Message, ModalId, Task};
pub use router::View;
pub use state::{AppState, MODAL_EXIT, TOAST_DURATION, ToastLevel};
pub use widgets::{BindingId, Bindings, Page};
