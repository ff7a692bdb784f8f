//! Navigation context integration tests.
//!
//! The fixture mirrors the character-chat application: a list view at `/`
//! and a chat view at `/chat/:character_id` with props forwarding.

use std::cell::RefCell;
use std::rc::Rc;

use octothorpe::{Route, RouteTable};
use octothorpe_nav::{
    HistoryMode, NavConfig, NavigationContext, NavigationError, NavigationTarget,
};
use pretty_assertions::assert_eq;

fn chat_table() -> RouteTable<&'static str> {
    RouteTable::builder()
        .route(Route::new("home", "/", "CharacterListView"))
        .route(Route::new("chat", "/chat/:character_id", "ChatView").with_props())
        .build()
        .unwrap()
}

#[test]
fn test_push_mounts_view_with_props() {
    let mut nav = NavigationContext::in_memory(chat_table());

    nav.push("/chat/42").unwrap();

    let current = nav.current().unwrap();
    assert_eq!(current.name(), "chat");
    assert_eq!(current.view(), &"ChatView");
    assert_eq!(current.params().get("character_id"), Some("42"));
    assert_eq!(current.props().get("character_id"), Some("42"));
}

#[test]
fn test_back_restores_list_view_without_residual_params() {
    let mut nav = NavigationContext::in_memory(chat_table());

    nav.push("/").unwrap();
    nav.push("/chat/abc").unwrap();
    assert!(nav.back().unwrap());

    let current = nav.current().unwrap();
    assert_eq!(current.name(), "home");
    assert_eq!(current.view(), &"CharacterListView");
    // No character_id leaks into the list view's inputs.
    assert!(current.params().is_empty());
    assert!(current.props().is_empty());
}

#[test]
fn test_back_and_forward_traversal() {
    let mut nav = NavigationContext::in_memory(chat_table());

    nav.push("/").unwrap();
    nav.push("/chat/1").unwrap();
    nav.push("/chat/2").unwrap();

    assert!(nav.back().unwrap());
    assert_eq!(nav.current().unwrap().location().path(), "/chat/1");

    assert!(nav.forward().unwrap());
    assert_eq!(nav.current().unwrap().location().path(), "/chat/2");

    // At the newest entry, forward is a no-op.
    assert!(!nav.forward().unwrap());
    assert_eq!(nav.current().unwrap().location().path(), "/chat/2");
}

#[test]
fn test_push_after_back_truncates_forward_entries() {
    let mut nav = NavigationContext::in_memory(chat_table());

    nav.push("/").unwrap();
    nav.push("/chat/1").unwrap();
    assert!(nav.back().unwrap());
    nav.push("/chat/2").unwrap();

    assert!(!nav.forward().unwrap());
    assert_eq!(nav.current().unwrap().location().path(), "/chat/2");
}

#[test]
fn test_failed_navigation_leaves_state_untouched() {
    let mut nav = NavigationContext::in_memory(chat_table());

    nav.push("/chat/42").unwrap();
    let err = nav.push("/does/not/exist").unwrap_err();
    assert!(matches!(err, NavigationError::Resolve(_)));

    // Still on the chat view, and back() has nowhere earlier to go.
    assert_eq!(nav.current().unwrap().name(), "chat");
    assert!(!nav.back().unwrap());
}

#[test]
fn test_named_navigation_generates_the_url() {
    let mut nav = NavigationContext::in_memory(chat_table());

    nav.push(NavigationTarget::named("chat", &[("character_id", "42")]))
        .unwrap();

    assert_eq!(nav.current().unwrap().location().path(), "/chat/42");
}

#[test]
fn test_named_navigation_with_missing_param_fails() {
    let mut nav = NavigationContext::in_memory(chat_table());

    let err = nav
        .push(NavigationTarget::named("chat", &[]))
        .unwrap_err();
    assert!(matches!(err, NavigationError::Url(_)));
    assert!(nav.current().is_none());
}

#[test]
fn test_subscribers_see_mount_and_unmount() {
    let events: Rc<RefCell<Vec<(Option<String>, String)>>> = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&events);

    let mut nav = NavigationContext::in_memory(chat_table());
    nav.subscribe(move |event| {
        log.borrow_mut().push((
            event.from.as_ref().map(|r| r.name().to_string()),
            event.to.name().to_string(),
        ));
    });

    nav.push("/").unwrap();
    nav.push("/chat/42").unwrap();
    nav.back().unwrap();

    assert_eq!(
        events.borrow().as_slice(),
        &[
            (None, "home".to_string()),
            (Some("home".to_string()), "chat".to_string()),
            (Some("chat".to_string()), "home".to_string()),
        ]
    );
}

#[test]
fn test_redirect_is_followed_to_the_view() {
    let table = RouteTable::builder()
        .route(Route::new("chat", "/chat/:character_id", "ChatView").with_props())
        .route(Route::redirect(
            "legacy-chat",
            "/talk/:character_id",
            "/chat/:character_id",
        ))
        .build()
        .unwrap();

    let mut nav = NavigationContext::in_memory(table);
    nav.push("/talk/42").unwrap();

    let current = nav.current().unwrap();
    assert_eq!(current.name(), "chat");
    assert_eq!(current.location().path(), "/chat/42");
    assert_eq!(current.props().get("character_id"), Some("42"));
}

#[test]
fn test_redirect_cycle_is_bounded() {
    let table = RouteTable::builder()
        .route(Route::<&str>::redirect("ping", "/ping", "/pong"))
        .route(Route::<&str>::redirect("pong", "/pong", "/ping"))
        .build()
        .unwrap();

    let mut nav = NavigationContext::in_memory(table);
    let err = nav.push("/ping").unwrap_err();

    assert!(matches!(err, NavigationError::RedirectLoop { .. }));
    assert!(nav.current().is_none());
}

#[test]
fn test_browser_location_in_web_mode_with_base() {
    let mut nav =
        NavigationContext::in_memory(chat_table()).with_mode(HistoryMode::web("/app"));

    nav.handle_browser_location("/app/chat/42").unwrap();
    assert_eq!(nav.current().unwrap().name(), "chat");

    let err = nav.handle_browser_location("/elsewhere").unwrap_err();
    assert!(matches!(err, NavigationError::OutsideBase(_)));
}

#[test]
fn test_browser_location_in_hash_mode() {
    let mut nav = NavigationContext::in_memory(chat_table()).with_mode(HistoryMode::hash());

    nav.handle_browser_location("/index.html#/chat/42").unwrap();
    assert_eq!(nav.current().unwrap().name(), "chat");

    // No fragment means the app root.
    nav.handle_browser_location("/index.html").unwrap();
    assert_eq!(nav.current().unwrap().name(), "home");
}

#[test]
fn test_href_through_mode() {
    let nav = NavigationContext::in_memory(chat_table()).with_mode(HistoryMode::web("/app"));

    assert_eq!(nav.href("/chat/42").unwrap(), "/app/chat/42");
    assert_eq!(
        nav.href(NavigationTarget::named("chat", &[("character_id", "42")]))
            .unwrap(),
        "/app/chat/42"
    );

    let hash_nav = NavigationContext::in_memory(chat_table()).with_mode(HistoryMode::hash());
    assert_eq!(hash_nav.href("/chat/42").unwrap(), "#/chat/42");

    // url_for stays app-internal, independent of the mode.
    assert_eq!(nav.url_for("chat", [("character_id", "7")]).unwrap(), "/chat/7");
}

#[test]
fn test_context_from_config() {
    let toml = r#"
        [routing]
        base_path = "/app"
        max_redirects = 2
    "#;
    let config: NavConfig = toml::from_str(toml).unwrap();

    let mut nav = NavigationContext::from_config(
        chat_table(),
        octothorpe_nav::MemoryHistory::new(),
        &config,
    );

    assert_eq!(nav.mode(), &HistoryMode::web("/app"));
    nav.handle_browser_location("/app/chat/7").unwrap();
    assert_eq!(nav.current().unwrap().name(), "chat");
}

#[test]
fn test_query_and_fragment_survive_navigation() {
    let mut nav = NavigationContext::in_memory(chat_table());

    nav.push("/chat/42?tab=voice#latest").unwrap();

    let location = nav.current().unwrap().location().clone();
    assert_eq!(location.path(), "/chat/42");
    assert_eq!(location.query_value("tab"), Some("voice".to_string()));
    assert_eq!(location.fragment(), Some("latest"));

    // The history entry keeps the full location for traversal.
    nav.push("/").unwrap();
    nav.back().unwrap();
    assert_eq!(
        nav.current().unwrap().location().to_string(),
        "/chat/42?tab=voice#latest"
    );
}
