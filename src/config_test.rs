#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_consts() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.handle_size, DEFAULT_HANDLE_SIZE);
    assert_eq!(cfg.rotation_handle_offset, DEFAULT_ROTATION_HANDLE_OFFSET);
}

#[test]
fn from_lookup_empty_uses_defaults() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = EngineConfig::from_lookup(lookup_from(&[
        (HANDLE_SIZE_VAR, "12"),
        (ROTATION_HANDLE_OFFSET_VAR, " 30.5 "),
    ]))
    .unwrap();
    assert_eq!(cfg.handle_size, 12.0);
    assert_eq!(cfg.rotation_handle_offset, 30.5);
}

#[test]
fn from_lookup_rejects_garbage() {
    let err = EngineConfig::from_lookup(lookup_from(&[(HANDLE_SIZE_VAR, "big")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: HANDLE_SIZE_VAR, value: "big".into() });
}

#[test]
fn from_lookup_rejects_non_positive_and_non_finite() {
    for bad in ["0", "-4", "inf", "NaN"] {
        let result = EngineConfig::from_lookup(lookup_from(&[(ROTATION_HANDLE_OFFSET_VAR, bad)]));
        assert!(result.is_err(), "{bad}");
    }
}

#[test]
fn error_message_names_variable() {
    let err = ConfigError::InvalidNumber { var: HANDLE_SIZE_VAR, value: "x".into() };
    assert_eq!(err.to_string(), "LABELKIT_HANDLE_SIZE must be a positive number, got \"x\"");
}

#[test]
fn deserialize_partial_fills_defaults() {
    let cfg: EngineConfig = serde_json::from_str(r#"{"handle_size": 5}"#).unwrap();
    assert_eq!(cfg.handle_size, 5.0);
    assert_eq!(cfg.rotation_handle_offset, DEFAULT_ROTATION_HANDLE_OFFSET);
}

// =============================================================
// validate
// =============================================================

#[test]
fn validate_accepts_defaults() {
    assert_eq!(EngineConfig::default().validate(), Ok(EngineConfig::default()));
}

#[test]
fn validate_names_the_bad_field() {
    let cfg = EngineConfig { handle_size: -5.0, ..EngineConfig::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::NotPositive { field: "handle_size", value: -5.0 }));

    let cfg = EngineConfig { rotation_handle_offset: 0.0, ..EngineConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { field: "rotation_handle_offset", .. })));
}

#[test]
fn validate_rejects_non_finite() {
    for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let cfg = EngineConfig { handle_size: bad, ..EngineConfig::default() };
        assert!(cfg.validate().is_err(), "{bad}");
    }
}

#[test]
fn not_positive_message() {
    let err = ConfigError::NotPositive { field: "handle_size", value: -5.0 };
    assert_eq!(err.to_string(), "handle_size must be a positive number, got -5");
}

// =============================================================
// ConfigOverrides
// =============================================================

#[test]
fn overrides_apply_only_present_fields() {
    let base = EngineConfig { handle_size: 8.0, rotation_handle_offset: 40.0 };
    let block = ConfigOverrides { handle_size: Some(6.0), rotation_handle_offset: None };
    assert_eq!(block.apply_to(base), EngineConfig { handle_size: 6.0, rotation_handle_offset: 40.0 });
}

#[test]
fn overrides_overlay_prefers_top() {
    let block = ConfigOverrides { handle_size: Some(6.0), rotation_handle_offset: Some(30.0) };
    let flags = ConfigOverrides { handle_size: Some(4.0), rotation_handle_offset: None };
    let merged = block.overlay(flags);
    assert_eq!(merged, ConfigOverrides { handle_size: Some(4.0), rotation_handle_offset: Some(30.0) });
}

#[test]
fn env_then_block_then_flags() {
    let env = EngineConfig::from_lookup(lookup_from(&[
        (HANDLE_SIZE_VAR, "9"),
        (ROTATION_HANDLE_OFFSET_VAR, "50"),
    ]))
    .unwrap();
    let block: ConfigOverrides = serde_json::from_str(r#"{"handle_size": 5}"#).unwrap();
    let flags = ConfigOverrides { handle_size: Some(7.0), ..ConfigOverrides::default() };

    assert_eq!(block.apply_to(env), EngineConfig { handle_size: 5.0, rotation_handle_offset: 50.0 });
    assert_eq!(block.overlay(flags).apply_to(env), EngineConfig { handle_size: 7.0, rotation_handle_offset: 50.0 });
}

#[test]
fn overrides_serialize_skips_absent() {
    let block = ConfigOverrides { handle_size: Some(5.0), rotation_handle_offset: None };
    assert_eq!(serde_json::to_string(&block).unwrap(), r#"{"handle_size":5.0}"#);
}
