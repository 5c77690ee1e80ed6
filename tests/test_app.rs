mod common;
use common::*;

use std::time::Duration;

use megaprop::gui::{REPORT_DELAY, TOAST_DURATION};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_refresh_waits_then_confirms() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;

    let task = click(&mut app, Message::Refresh).await;
    assert_eq!(app.state().toast.as_ref().map(|t| t.message.as_str()), Some("Actualizando..."));
    let scheduled = task.scheduled();
    assert!(scheduled.contains(&(Duration::from_secs(1), &Message::Refreshed)));

    let started = Instant::now();
    app.run_until_idle(task, Pacing::RealTime).await;
    // One second to refresh, then the confirmation stays up for its full duration.
    let expected = Duration::from_secs(1) + TOAST_DURATION;
    assert!(started.elapsed() >= expected);
    assert!(started.elapsed() < expected + Duration::from_millis(50));
    assert!(app.state().toast.is_none());
    Ok(())
}

#[tokio::test]
async fn test_newer_toast_survives_older_dismissal() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;

    let first = app.update(Message::Offline).await;
    assert!(!app.state().online);
    assert!(app.view().into_string().contains(r#"class="offline""#));

    let second = app.update(Message::Online).await;
    let toast = app.state().toast.clone().expect("a toast");
    assert_eq!(toast.message, "Conexión restaurada");

    app.run_until_idle(first, Pacing::Immediate).await;
    assert_eq!(app.state().toast.as_ref(), Some(&toast));
    app.run_until_idle(second, Pacing::Immediate).await;
    assert!(app.state().toast.is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_generated_report_is_listed_and_saved() -> anyhow::Result<()> {
    let (mut app, storage) = create_test_app().await;
    app.update(Message::Navigate(View::Reports)).await;

    let task = click(&mut app, Message::GenerateReport(ReportKind::Occupancy)).await;
    assert!(app.store().database().reports().is_empty());
    assert!(task.scheduled().contains(&(REPORT_DELAY, &Message::ReportReady(ReportKind::Occupancy))));

    app.run_until_idle(task, Pacing::RealTime).await;
    let reports = app.store().database().reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, ReportKind::Occupancy);
    assert!(reports[0].title.ends_with("Octubre 2026"));

    let html = app.render_content().into_string();
    assert!(html.contains(&reports[0].title));
    assert!(!html.contains("No hay reportes generados"));

    let reopened = open_app(storage).await;
    assert_eq!(reopened.store().database().reports().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_logout_asks_then_reloads() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;
    add_property(&mut app, "12500").await;
    app.update(Message::Navigate(View::Settings)).await;

    // Declining leaves everything as it was.
    click(&mut app, Message::Logout).await;
    assert!(app.view().into_string().contains("¿Estás seguro de cerrar sesión?"));
    click(&mut app, Message::DismissConfirm).await;
    assert!(app.state().confirm.is_none());
    assert_eq!(app.current_view(), View::Settings);

    click(&mut app, Message::Logout).await;
    let task = click(&mut app, Message::AcceptConfirm).await;
    assert_eq!(task, Task::done(Message::LogoutConfirmed));
    assert!(app.state().confirm.is_none());

    app.run_until_idle(task, Pacing::Immediate).await;
    assert_eq!(app.current_view(), View::Dashboard);
    assert_eq!(app.state().router.history().len(), 1);
    assert_eq!(app.store().database().properties().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_reload_drops_unsaved_changes() -> anyhow::Result<()> {
    let storage = MemoryStorage::with_quota(64);
    let mut app = open_app(storage).await;
    submit_form(&mut app, FormKind::Tenant, &JUAN).await;
    assert_eq!(app.store().database().tenants().len(), 1);

    app.update(Message::Reload).await;
    assert!(app.store().database().tenants().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_notifications_and_unwired_controls_toast() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;

    click(&mut app, Message::ShowNotifications).await;
    assert_eq!(
        app.state().toast.as_ref().map(|t| t.message.as_str()),
        Some("Sin notificaciones nuevas")
    );

    app.update(Message::Navigate(View::Settings)).await;
    let task = click(
        &mut app,
        Message::Unavailable(megaprop::gui::Feature::EditProfile),
    )
    .await;
    let toast = app.state().toast.clone().expect("a toast");
    assert_eq!(toast.level, ToastLevel::Info);
    assert!(toast.message.contains("Edición de perfil"));
    assert_eq!(task.scheduled(), vec![(TOAST_DURATION, &Message::DismissToast(toast.id))]);
    Ok(())
}

#[tokio::test]
async fn test_dismissal_from_before_reload_spares_new_toast() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;

    let task = app.update(Message::LogoutConfirmed).await;
    let stale = task
        .scheduled()
        .into_iter()
        .map(|(_, message)| message.clone())
        .find(|message| matches!(message, Message::DismissToast(_)))
        .expect("logout toast schedules its dismissal");

    app.update(Message::Reload).await;
    assert!(app.state().toast.is_none());
    assert_eq!(app.current_view(), View::Dashboard);

    app.update(Message::Online).await;
    let toast = app.state().toast.clone().expect("a toast");
    app.update(stale).await;
    assert_eq!(app.state().toast.as_ref(), Some(&toast));
    Ok(())
}
