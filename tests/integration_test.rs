use people_admin::api::{ApiResponse, Method, PeopleService};
use people_admin::config::AppConfig;
use people_admin::lifecycle::{AdminApp, AppError};
use people_admin::mock::{MockTransport, ScriptedDialogs};
use people_admin::model::ThemeName;
use async_trait::async_trait;
use people_admin::navigation::{Navigator, Viewport, PEOPLE_LIST_ROUTE};
use people_admin::screens::details::ScreenState;
use people_admin::screens::Dialogs;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn signed_in_config() -> AppConfig {
    AppConfig {
        access_token: Some("token".to_string()),
        ..AppConfig::default()
    }
}

fn app_with(mock: &MockTransport, dialogs: &ScriptedDialogs) -> AdminApp {
    AdminApp::with_people(
        &signed_in_config(),
        Arc::new(PeopleService::new(mock.clone())),
        Arc::new(dialogs.clone()),
    )
}

/// End-to-end flow through the stores, the menu and a details screen.
#[tokio::test]
async fn test_full_application_flow() {
    let mock = MockTransport::new();
    let dialogs = ScriptedDialogs::new(true);
    let mut app = app_with(&mock, &dialogs);

    // The menu starts on the people listing
    let menu = app.menu();
    let view = menu.view(app.viewport());
    let active: Vec<_> = view
        .items
        .iter()
        .filter(|item| item.active)
        .map(|item| item.option.label.as_str())
        .collect();
    assert_eq!(active, vec!["People"]);

    // Listing reads the total from the header
    mock.expect(Method::Get, "/people").respond(
        ApiResponse::ok(json!([
            {"id": 1, "completeName": "Ada Lovelace", "email": "ada@example.com", "cityId": 1}
        ]))
        .with_header("X-Total-Count", 6),
    );
    let page = app.people().get_all(1, "").await.expect("listing failed");
    assert_eq!(page.total_count, 6);

    // Open, edit and save an existing record
    mock.expect(Method::Get, "/people/1").respond_ok(json!({
        "id": 1, "completeName": "Ada Lovelace", "email": "ada@example.com", "cityId": 1
    }));
    mock.expect(Method::Put, "/people/1").respond_ok(json!({}));

    let screen = app.open_details("1");
    screen
        .wait_for(|v| !v.is_loading)
        .await
        .expect("screen stopped");
    screen.edit_name("Augusta Ada King").await.expect("edit failed");
    screen.save_and_close().await.expect("save failed");
    let view = screen
        .wait_for(|v| v.state == ScreenState::Closed)
        .await
        .expect("screen never closed");
    assert_eq!(view.title, "Augusta Ada King");
    assert_eq!(app.router.location(), PEOPLE_LIST_ROUTE);

    // Theme switch is visible through the menu
    menu.toggle_theme().await.expect("toggle failed");
    assert_eq!(app.theme.theme_name(), ThemeName::Dark);

    // Logging out empties the menu
    menu.logout().await.expect("logout failed");
    assert!(menu.view(Viewport::new(1280)).items.is_empty());

    app.shutdown().await.expect("shutdown failed");
    mock.verify();
    assert!(dialogs.alerts().is_empty());
}

#[tokio::test]
async fn test_shutdown_unmounts_open_screens() {
    let mock = MockTransport::new();
    let dialogs = ScriptedDialogs::new(true);
    let mut app = app_with(&mock, &dialogs);
    mock.expect(Method::Get, "/people/2").hang();

    let screen = app.open_details("2");
    let other = app.open_details("nova");
    other
        .wait_for(|v| v.state != ScreenState::Loading)
        .await
        .expect("new screen stopped");

    app.shutdown().await.expect("shutdown failed");
    assert_eq!(screen.view().state, ScreenState::Closed);
    assert_eq!(other.view().state, ScreenState::Closed);
}

#[tokio::test]
async fn test_closed_screens_are_released() {
    let mock = MockTransport::new();
    let dialogs = ScriptedDialogs::new(true);
    let mut app = app_with(&mock, &dialogs);

    for _ in 0..20 {
        let screen = app.open_details("nova");
        screen.back().await.expect("back failed");
    }

    tokio::time::timeout(Duration::from_secs(1), async {
        while app.open_screens() > 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("closed screens were kept");

    let screen = app.open_details("nova");
    assert_eq!(app.open_screens(), 1);
    app.shutdown().await.expect("shutdown failed");
    assert_eq!(screen.view().state, ScreenState::Closed);
}

/// Alerts panic, so any screen that alerts takes its task down.
struct FailingDialogs;

#[async_trait]
impl Dialogs for FailingDialogs {
    async fn alert(&self, message: &str) {
        panic!("cannot show alert: {message}");
    }

    async fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

#[tokio::test]
async fn test_shutdown_finishes_teardown_after_a_failed_screen() {
    let mock = MockTransport::new();
    let mut app = AdminApp::with_people(
        &signed_in_config(),
        Arc::new(PeopleService::new(mock.clone())),
        Arc::new(FailingDialogs),
    );
    let theme = app.theme.clone();

    let healthy = app.open_details("nova");
    healthy
        .wait_for(|v| v.state != ScreenState::Loading)
        .await
        .expect("new screen stopped");
    let later = app.open_details("nova");
    later
        .wait_for(|v| v.state != ScreenState::Loading)
        .await
        .expect("new screen stopped");
    app.open_details("abc");

    let error = app.shutdown().await.expect_err("failed screen was not reported");
    assert!(error.contains("Screen task failed"), "{error}");
    assert_eq!(healthy.view().state, ScreenState::Closed);
    assert_eq!(later.view().state, ScreenState::Closed);
    assert!(theme.toggle_theme().await.is_err());
}

#[tokio::test]
async fn test_drawer_closes_after_navigation_on_narrow_viewports() {
    let mock = MockTransport::new();
    let dialogs = ScriptedDialogs::new(true);
    let app = app_with(&mock, &dialogs);
    let menu = app.menu();
    let narrow = Viewport::new(480);

    assert!(menu.toggle_drawer().await.expect("toggle failed"));
    let home = menu.view(narrow).items[0].option.clone();
    menu.select(&home, narrow).await.expect("select failed");

    assert!(!app.drawer.state().is_open);
    assert_eq!(app.router.location(), "/pagina-inicial");
    app.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn test_start_rejects_invalid_config() {
    let config = AppConfig {
        api_url: "not a url".to_string(),
        ..AppConfig::default()
    };
    let result = AdminApp::start(&config, Arc::new(ScriptedDialogs::default()));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[tokio::test]
async fn test_start_and_shutdown_without_requests() {
    let app = AdminApp::start(&AppConfig::default(), Arc::new(ScriptedDialogs::default()))
        .expect("start failed");
    assert!(!app.auth.is_authenticated());
    assert_eq!(app.theme.theme_name(), ThemeName::Light);
    app.shutdown().await.expect("shutdown failed");
}
