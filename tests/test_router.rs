mod common;
use common::*;

#[tokio::test]
async fn test_every_view_renders_with_one_active_entry() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;

    for view in View::ALL {
        app.update(Message::Navigate(view)).await;
        assert_eq!(app.current_view(), view);

        let html = app.view().into_string();
        assert_eq!(active_views(&html), vec![view.route().to_string()], "{view:?}");
        assert!(html.contains(&format!(r#"data-page="{}""#, view.route())));
        assert!(html.contains(view.title()));
    }
    Ok(())
}

#[tokio::test]
async fn test_navigation_through_bound_elements() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;

    click(&mut app, Message::Navigate(View::Contracts)).await;
    assert_eq!(app.current_view(), View::Contracts);

    click(&mut app, Message::ShowProfile).await;
    assert_eq!(app.current_view(), View::Settings);

    click(&mut app, Message::Navigate(View::More)).await;
    click(&mut app, Message::Route("insurance".into())).await;
    assert_eq!(app.current_view(), View::Dashboard);
    Ok(())
}

#[tokio::test]
async fn test_back_and_forward_follow_history() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;
    app.update(Message::Navigate(View::Properties)).await;
    app.update(Message::Route("#tenants".into())).await;

    app.update(Message::Back).await;
    assert_eq!(app.current_view(), View::Properties);
    app.update(Message::Back).await;
    assert_eq!(app.current_view(), View::Dashboard);
    app.update(Message::Back).await;
    assert_eq!(app.current_view(), View::Dashboard);

    app.update(Message::Forward).await;
    assert_eq!(app.current_view(), View::Properties);

    // Navigating from the middle of history drops the forward entries.
    app.update(Message::Navigate(View::Reports)).await;
    app.update(Message::Forward).await;
    assert_eq!(app.current_view(), View::Reports);
    assert_eq!(app.state().router.history().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_sidebar_closes_on_navigation() -> anyhow::Result<()> {
    let (mut app, _storage) = create_test_app().await;

    click(&mut app, Message::ToggleSidebar).await;
    assert!(app.state().router.sidebar_open());
    assert!(app.view().into_string().contains("mobile-sidebar active"));

    click(&mut app, Message::CloseSidebar).await;
    assert!(!app.state().router.sidebar_open());

    app.update(Message::OpenSidebar).await;
    app.update(Message::Navigate(View::Payments)).await;
    assert!(!app.state().router.sidebar_open());
    assert!(!app.view().into_string().contains("mobile-sidebar active"));
    Ok(())
}
