// ABOUTME: Integration tests verifying the store, config and errors work together.
// ABOUTME: Models a small command dispatcher gating commands on permissions.

use std::io::Write;

use warden::prelude::*;

/// A console command with the permission it requires.
struct Command {
    name: &'static str,
    required: &'static str,
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        required: names::NO_PERMISSION,
    },
    Command {
        name: "say",
        required: names::CHAT,
    },
    Command {
        name: "give",
        required: names::CHEAT,
    },
    Command {
        name: "shutdown",
        required: names::SERVER_MANAGEMENT,
    },
];

fn dispatch(store: &PermissionStore<u64>, player: u64, name: &str) -> Result<String, WardenError> {
    let command = COMMANDS
        .iter()
        .find(|c| c.name == name)
        .expect("Command should exist");
    store.require(&player, command.required)?;
    Ok(format!("ran {}", command.name))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_dispatch_with_defaults() {
    init_tracing();
    let config = PermissionConfig::default();
    let store = PermissionStore::from_config(&config, Some(0));
    store.on_connect(&1);

    assert_eq!(dispatch(&store, 1, "help").unwrap(), "ran help");
    assert_eq!(dispatch(&store, 1, "say").unwrap(), "ran say");

    let err = dispatch(&store, 1, "shutdown").unwrap_err();
    assert!(matches!(
        err,
        WardenError::Permission(PermissionError::Denied { ref permission })
            if permission == names::SERVER_MANAGEMENT
    ));
    assert_eq!(
        err.to_string(),
        "Permission error: Permission 'serverManagement' required"
    );

    // The host can run anything
    assert!(dispatch(&store, 0, "shutdown").is_ok());
}

#[test]
fn test_admin_grants_and_session_end() {
    init_tracing();
    let store = PermissionStore::with_local_identity(0u64);
    store.add_permission(&7, names::USER_MANAGEMENT);

    // A user manager hands out cheats
    if store.has_permission(&7, names::USER_MANAGEMENT) {
        store.add_permission(&8, names::CHEAT);
    }
    assert!(dispatch(&store, 8, "give").is_ok());

    // Anyone holding a management permission
    let is_staff = |p: &str| p.ends_with("Management");
    assert!(store.has_permission_matching(&7, is_staff));
    assert!(!store.has_permission_matching(&8, is_staff));

    assert_eq!(store.forget(&8), vec![names::CHEAT]);
    assert!(dispatch(&store, 8, "give").is_err());
    assert_eq!(store.count(), 1);
}

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"defaultPermissions": ["chat", "debug"], "localBypass": false}}"#
    )
    .unwrap();

    let config = PermissionConfig::load(file.path()).unwrap();
    let store = PermissionStore::from_config(&config, Some(0u64));
    store.on_connect(&3);

    assert!(store.has_permission(&3, names::DEBUG));
    assert!(!store.has_permission(&0, names::DEBUG));
}

#[test]
fn test_load_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PermissionConfig::load(dir.path().join("permissions.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));

    let err: WardenError = err.into();
    assert!(err.to_string().starts_with("Config error: IO error"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_grants_and_checks() {
    let store = PermissionStore::<uuid::Uuid>::new();
    let player = uuid::Uuid::new_v4();
    let mut handles = Vec::new();

    // Spawn 100 writers, each granting a distinct permission, alongside readers
    for k in 0..100 {
        let store = store.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            store.add_permission(&player, &format!("p{k}"));
            store.has_permission(&player, &format!("p{k}"))
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let held = store.permissions(&player);
    assert_eq!(held.len(), 100);
    let mut expected: Vec<_> = (0..100).map(|k| format!("p{k}")).collect();
    expected.sort();
    assert_eq!(held, expected);
}
