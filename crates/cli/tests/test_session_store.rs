use licport_cli::session::SessionStore;
use licport_core::{PortalConfig, Session};

fn session(access: &str, refresh: Option<&str>) -> Session {
    Session {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
    }
}

#[test]
fn empty_store_has_no_session() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path().join("missing"));
    assert!(!store.has_session());
    assert_eq!(store.current_token(), None);
    assert_eq!(store.refresh_token(), None);
    store.clear().unwrap();
}

#[test]
fn save_then_read_back() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path());
    store.save(&session("a.b.c", Some("refresh-1"))).unwrap();

    assert_eq!(store.current_token().as_deref(), Some("a.b.c"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
}

#[test]
fn new_login_without_refresh_drops_the_old_one() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path());
    store.save(&session("first.token", Some("old-refresh"))).unwrap();
    store.save(&session("second.token", None)).unwrap();

    assert_eq!(store.current_token().as_deref(), Some("second.token"));
    assert_eq!(store.refresh_token(), None);
}

#[test]
fn new_key_preferred_over_legacy() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("token"), "legacy.token\n").unwrap();
    let store = SessionStore::new(tmp.path());
    assert_eq!(store.current_token().as_deref(), Some("legacy.token"));

    std::fs::write(tmp.path().join("access_token"), "fresh.token").unwrap();
    assert_eq!(store.current_token().as_deref(), Some("fresh.token"));
}

#[test]
fn blank_files_count_as_missing() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("access_token"), "   \n").unwrap();
    let store = SessionStore::new(tmp.path());
    assert!(!store.has_session());
}

#[test]
fn clear_removes_all_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path());
    store.save(&session("a.b.c", Some("r"))).unwrap();
    std::fs::write(tmp.path().join("token"), "legacy.token").unwrap();

    store.clear().unwrap();

    for name in ["access_token", "refresh_token", "token"] {
        assert!(!tmp.path().join(name).exists(), "{name} survived");
    }
}

#[test]
fn config_overrides_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = PortalConfig::default();
    config.session.dir = Some(tmp.path().join("custom"));

    let store = SessionStore::from_config(&config);

    assert_eq!(store.dir(), tmp.path().join("custom"));
}

#[cfg(unix)]
#[test]
fn token_files_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let store = SessionStore::new(tmp.path());
    store.save(&session("a.b.c", None)).unwrap();

    let mode = std::fs::metadata(tmp.path().join("access_token"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
