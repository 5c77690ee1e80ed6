mod fixtures;
pub use fixtures::*;

pub use megaprop::{
    CurrentUser, MegaApp,
    core::db::{
        ContractRepository, ContractStatus, Database, FixedClock, KeyValueStorage, MemoryStorage,
        NotificationRepository, PropertyRepository, PropertyStatus, ReportKind, ReportRepository,
        Store, TenantRepository,
    },
    gui::{FormKind, Message, ModalId, Pacing, Task, ToastLevel, View, state::Toast},
};
