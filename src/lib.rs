pub mod config;
pub mod core;
pub mod gui;

pub use config::{AppConfig, CurrentUser};
pub use core::db::{Database, Store};
pub use gui::{MegaApp, Message, View};
