//! Integration tests for the navigation flow.
//!
//! Tests the complete path: RouteTable → AccessGate → HistoryLedger → SessionStore

use cardnav_auth::testing::ScriptedProvider;
use cardnav_auth::{AccessGate, AllowSet, GateState};
use cardnav_runtime::{
    CardDeck, HistoryConfig, HistoryLedger, LocalFileStore, MemoryStore, NavConfig, NavSession,
    Navigator, RouteTable, SessionStore, View, DEFAULT_STORAGE_KEY,
};
use cardnav_types::{PageId, SessionId, TryNew};
use std::sync::Arc;
use tempfile::TempDir;

fn deck() -> CardDeck {
    CardDeck::from_json(
        r#"{"cards": [
            {"pageId": "home", "title": "Home", "links": ["a"]},
            {"pageId": "a", "title": "A"},
            {"pageId": "b", "title": "B"},
            {"pageId": "c", "title": "C"},
            {"pageId": "d", "title": "D"},
            {"pageId": "e", "title": "E"}
        ]}"#,
    )
    .expect("deck should parse")
}

fn ids(nav: &Navigator) -> Vec<String> {
    nav.history()
        .iter()
        .map(|e| e.page_id().to_string())
        .collect()
}

/// Visit a..d, jump back to b, branch off to e.
#[test]
fn branch_after_jump_replaces_forward_history() {
    let store = Arc::new(MemoryStore::new());
    let gate = Arc::new(AccessGate::new(
        AllowSet::open(),
        Arc::new(ScriptedProvider::resolved(None)),
    ));
    let nav = Navigator::new(
        HistoryLedger::restore(store.clone()),
        gate,
        deck(),
        RouteTable::new(),
    );

    for path in ["/a", "/b", "/c", "/d"] {
        nav.navigate(path);
    }
    nav.jump(1);
    assert_eq!(ids(&nav), ["a", "b"]);

    nav.navigate("/e");
    assert_eq!(ids(&nav), ["a", "b", "e"]);

    // The stored copy matches what a fresh ledger rehydrates to.
    let rehydrated = HistoryLedger::restore(store.clone());
    let stored: Vec<_> = rehydrated.page_ids().map(PageId::as_str).collect();
    assert_eq!(stored, ["a", "b", "e"]);
    assert!(store.contains(DEFAULT_STORAGE_KEY).unwrap());
}

/// 55 visits keep the newest 50.
#[test]
fn long_session_keeps_newest_fifty() {
    let store = Arc::new(MemoryStore::new());
    let mut ledger = HistoryLedger::restore(store.clone());
    for i in 1..=55 {
        ledger.append(PageId::try_new(format!("p{i}")).unwrap());
    }

    let rehydrated = HistoryLedger::restore(store);
    let stored: Vec<_> = rehydrated.page_ids().map(PageId::as_str).collect();
    let expected: Vec<String> = (6..=55).map(|i| format!("p{i}")).collect();
    assert_eq!(stored, expected);
}

/// Gate decisions change with provider notices, and denials never touch history.
#[test]
fn admin_routes_follow_notices() {
    let provider = Arc::new(ScriptedProvider::new());
    let gate = Arc::new(AccessGate::new(
        AllowSet::try_from_names(["alice"]).unwrap(),
        provider.clone(),
    ));
    let nav = Navigator::new(
        HistoryLedger::restore(Arc::new(MemoryStore::new())),
        gate.clone(),
        deck(),
        RouteTable::new(),
    );

    assert_eq!(gate.state(), GateState::Loading);
    assert_eq!(nav.navigate("/admin"), View::Missing);

    provider.notify(Some(ScriptedProvider::principal("bob")));
    assert_eq!(nav.navigate("/admin"), View::Missing);

    provider.notify(Some(ScriptedProvider::principal("alice")));
    assert_eq!(nav.navigate("/admin"), View::Admin);

    provider.notify(None);
    assert_eq!(nav.navigate("/admin/graph"), View::Missing);

    assert!(nav.history().is_empty());
}

/// A file-backed ledger shares nothing across sessions and survives restarts.
#[test]
fn file_backed_sessions() {
    let temp = TempDir::new().unwrap();
    let alpha = SessionId::try_new("alpha".to_string()).unwrap();
    let beta = SessionId::try_new("beta".to_string()).unwrap();
    let config = HistoryConfig {
        max_entries: 3,
        ..Default::default()
    };

    {
        let store = Arc::new(LocalFileStore::new(temp.path().to_path_buf(), &alpha).unwrap());
        let mut ledger = HistoryLedger::restore_with_config(store, &config);
        for id in ["a", "b", "c", "d"] {
            ledger.append_raw(Some(id));
        }
    }

    let store = Arc::new(LocalFileStore::new(temp.path().to_path_buf(), &alpha).unwrap());
    let ledger = HistoryLedger::restore_with_config(store, &config);
    let stored: Vec<_> = ledger.page_ids().map(PageId::as_str).collect();
    assert_eq!(stored, ["b", "c", "d"]);

    let other = Arc::new(LocalFileStore::new(temp.path().to_path_buf(), &beta).unwrap());
    assert!(HistoryLedger::restore_with_config(other, &config).is_empty());
}

/// End to end through NavSession, including sign-in and session teardown.
#[tokio::test]
async fn nav_session_lifecycle() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("cards.json");
    std::fs::write(
        &content,
        r#"{"cards": [{"pageId": "home", "title": "Welcome"}]}"#,
    )
    .unwrap();

    let mut config = NavConfig::default();
    config.paths.session_dir = Some(temp.path().join("sessions"));
    config.paths.content_file = Some(content);
    config.auth.allowed_users = vec!["alice".into()];

    let session = NavSession::open(&config, SessionId::try_new("s".to_string()).unwrap()).unwrap();
    let home = session.navigator().navigate("/");
    assert_eq!(home.to_string(), "# Welcome");

    assert_eq!(session.navigator().navigate("/upload"), View::Missing);
    session
        .login(cardnav_types::Handle::try_from("alice").unwrap())
        .await
        .unwrap();
    assert_eq!(session.navigator().navigate("/upload"), View::Upload);

    let dir = session.session_dir().to_path_buf();
    session.end().unwrap();
    assert!(!dir.exists());
}
