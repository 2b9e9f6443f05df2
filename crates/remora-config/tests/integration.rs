//! End-to-end settings lifecycle: mutate, persist, reload.

use remora_config::{ConfigService, ServerProfile};

#[test]
fn settings_survive_a_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("settings.json");

    let mut profile = ServerProfile::new("seedbox", "box.example.org", 443);
    profile.tls = true;
    profile.username = Some("remora".to_owned());

    {
        let mut service = ConfigService::load(&path).expect("first load");
        service.upsert_server(profile.clone()).expect("upsert");
        service
            .upsert_server(ServerProfile::new("home", "127.0.0.1", 9091))
            .expect("upsert second");
        service
            .set_default_server(Some("seedbox".to_owned()))
            .expect("set default");
    }

    let service = ConfigService::load(&path).expect("second load");
    let settings = service.settings();
    assert_eq!(settings.servers.len(), 2);
    assert_eq!(settings.default_server.as_deref(), Some("seedbox"));

    let reloaded = settings.server("seedbox").expect("profile present");
    assert_eq!(reloaded, &profile);
    assert_eq!(
        reloaded.rpc_url(),
        "https://box.example.org:443/transmission/rpc"
    );
}

#[test]
fn corrupt_settings_fail_to_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{not json").expect("write corrupt file");

    assert!(ConfigService::load(&path).is_err());
}
