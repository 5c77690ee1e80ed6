use std::sync::Arc;

use megaprop::{
    CurrentUser, MegaApp,
    core::db::{FixedClock, MemoryStorage, Store},
    gui::{FormKind, Message, ModalId, Pacing, Task, state::Toast},
};
use time::macros::datetime;

pub const TEST_KEY: &str = "megaMobileData";

/// Every test runs on 18 October 2026.
pub fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(datetime!(2026-10-18 10:00 UTC)))
}

/// Creates an app over fresh in-memory storage. The returned storage shares
/// its items with the app's.
pub async fn create_test_app() -> (MegaApp<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let app = open_app(storage.clone()).await;
    (app, storage)
}

pub async fn open_app(storage: MemoryStorage) -> MegaApp<MemoryStorage> {
    let store = Store::open(storage, TEST_KEY).await;
    MegaApp::new(store, CurrentUser::default()).with_clock(test_clock())
}

/// Opens the form for `kind` and types every `(field, value)` pair into it.
pub async fn fill_form(app: &mut MegaApp<MemoryStorage>, kind: FormKind, fields: &[(&str, &str)]) -> ModalId {
    app.update(Message::OpenModal(kind)).await;
    let modal = app
        .state()
        .modal_for(kind)
        .map(|m| m.id)
        .expect("form did not open");
    for (field, value) in fields {
        let task = app
            .update(Message::FieldInput {
                modal,
                field: field.to_string(),
                value: value.to_string(),
            })
            .await;
        assert!(task.is_none());
    }
    modal
}

/// Presses Guardar, returns the toast it raised and lets every scheduled
/// follow-up run.
pub async fn save_form(app: &mut MegaApp<MemoryStorage>, modal: ModalId) -> Option<Toast> {
    let task = app.update(Message::Save(modal)).await;
    let toast = app.state().toast.clone();
    app.run_until_idle(task, Pacing::Immediate).await;
    toast
}

pub async fn submit_form(app: &mut MegaApp<MemoryStorage>, kind: FormKind, fields: &[(&str, &str)]) -> Option<Toast> {
    let modal = fill_form(app, kind, fields).await;
    save_form(app, modal).await
}

/// Clicks the rendered element bound to `message`, failing if the current
/// page has none. Returns the follow-up task without running it.
pub async fn click(app: &mut MegaApp<MemoryStorage>, message: Message) -> Task {
    let page = app.view();
    let id = page
        .bindings
        .find(&message)
        .unwrap_or_else(|| panic!("nothing on {:?} dispatches {message:?}", app.current_view()));
    let resolved = page.bindings.resolve(id, None).expect("binding resolves");
    app.update(resolved).await
}

pub const JUAN: [(&str, &str); 4] = [
    ("nombre", "Juan"),
    ("apellidoPaterno", "Pérez"),
    ("telefono", "5551234"),
    ("email", "juan@x.com"),
];

pub const DEPTO: [(&str, &str); 10] = [
    ("codigo", "D-101"),
    ("tipo", "departamento"),
    ("calle", "Reforma"),
    ("numExt", "120"),
    ("numInt", "4"),
    ("colonia", "Centro"),
    ("cp", "06000"),
    ("delegacion", "Cuauhtémoc"),
    ("ciudad", "CDMX"),
    ("estado", "CDMX"),
];

pub async fn add_property(app: &mut MegaApp<MemoryStorage>, rent: &str) {
    let mut fields = DEPTO.to_vec();
    fields.push(("renta", rent));
    submit_form(app, FormKind::Property, &fields).await;
}

/// Routes of the navigation entries drawn as active, deduplicated in order.
pub fn active_views(html: &str) -> Vec<String> {
    let mut views = Vec::new();
    for tag in html.split('<').filter(|t| t.contains("data-view=\"")) {
        let tag = tag.split('>').next().unwrap_or_default();
        let active = attribute(tag, "class")
            .map(|class| class.split_whitespace().any(|c| c == "active"))
            .unwrap_or(false);
        if let (true, Some(view)) = (active, attribute(tag, "data-view")) {
            if !views.iter().any(|v| v == view) {
                views.push(view.to_string());
            }
        }
    }
    views
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let end = tag[start..].find('"')?;
    Some(&tag[start..start + end])
}
