use hilo_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::fs;

fn clear_env() {
    for v in [
        "HILO_CONFIG",
        "HILO_PACKS",
        "HILO_PENETRATION",
        "HILO_ROUNDS",
        "HILO_SEED",
        "HILO_MODE",
    ] {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn cfg() -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["hilo", "cfg"], &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn defaults() {
    clear_env();
    let (code, out, _) = cfg();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["packs"]["value"].as_u64(), Some(6));
    assert_eq!(json["penetration"]["value"].as_u64(), Some(204));
    assert_eq!(json["rounds"]["value"].as_u64(), Some(2000));
    assert_eq!(json["mode"]["value"].as_str(), Some("batch"));
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["seed"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn precedence_env_over_file_over_default() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hilo.toml");
    fs::write(&path, "packs = 8\npenetration = 300\nseed = 456\n").unwrap();
    unsafe {
        std::env::set_var("HILO_CONFIG", &path);
    }

    let (_, out, _) = cfg();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["packs"]["value"].as_u64(), Some(8));
    assert_eq!(json["packs"]["source"].as_str(), Some("file"));
    assert_eq!(json["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json["seed"]["source"].as_str(), Some("file"));

    unsafe {
        std::env::set_var("HILO_SEED", "789");
        std::env::set_var("HILO_MODE", "interactive");
    }
    let (_, out, _) = cfg();
    clear_env();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["seed"]["value"].as_u64(), Some(789));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["penetration"]["source"].as_str(), Some("file"));
    assert_eq!(json["mode"]["value"].as_str(), Some("interactive"));
    // budget follows the mode when unset
    assert_eq!(json["rounds"]["value"].as_u64(), Some(20));
    assert_eq!(json["rounds"]["source"].as_str(), Some("default"));
}

#[test]
#[serial]
fn unreadable_or_malformed_file_fails() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    unsafe {
        std::env::set_var("HILO_CONFIG", dir.path().join("missing.toml"));
    }
    let (code, out, err) = cfg();
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("HILO_CONFIG"), "{}", err);

    let bad = dir.path().join("bad.toml");
    fs::write(&bad, "packs = \"six\"\n").unwrap();
    unsafe {
        std::env::set_var("HILO_CONFIG", &bad);
    }
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("cannot parse config file"), "{}", err);
}

#[test]
#[serial]
fn invalid_values_are_rejected() {
    clear_env();
    unsafe {
        std::env::set_var("HILO_MODE", "turbo");
    }
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("HILO_MODE"));

    unsafe {
        std::env::set_var("HILO_ROUNDS", "0");
    }
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("rounds must be >= 1"));
}
