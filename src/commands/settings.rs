use crate::analysis::progress::ProgressRules;
use crate::auth::{is_valid_pin, DEFAULT_GUARDIAN_PIN};
use crate::models::chore::UNKNOWN_CHORE_LABEL;
use crate::state::AppState;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 2;
const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    pub guardian_pin: String,
    pub progress_rules: ProgressRules,
    pub unknown_chore_label: String,
}

/// Current settings with the PIN replaced by `guardianPinSet`.
pub async fn get_settings(state: &AppState) -> Result<Value, String> {
    load_settings_from_disk(&state.data_dir).map(redact_pin)
}

/// Merges a partial update into the saved settings. Requires the guardian PIN.
pub async fn save_settings(state: &AppState, pin: String, settings: Value) -> Result<Value, String> {
    let _pass = state.guardian(&pin)?;
    save_settings_to_disk(&state.data_dir, settings).map(redact_pin)
}

pub fn load_effective_settings(data_dir: &str) -> Result<EffectiveSettings, String> {
    let settings = load_settings_from_disk(data_dir)?;

    let guardian_pin = settings
        .get("guardianPin")
        .and_then(Value::as_str)
        .filter(|pin| is_valid_pin(pin))
        .unwrap_or(DEFAULT_GUARDIAN_PIN)
        .to_string();

    let defaults = ProgressRules::default();
    let progress_rules = ProgressRules {
        points_per_level: settings
            .get("pointsPerLevel")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.points_per_level)
            .max(1),
        trophy_threshold: settings
            .get("trophyThreshold")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.trophy_threshold),
        medal_unsettled_count: settings
            .get("medalUnsettledCount")
            .and_then(Value::as_u64)
            .map(|v| v as usize)
            .unwrap_or(defaults.medal_unsettled_count),
    };

    let unknown_chore_label = settings
        .get("unknownChoreLabel")
        .and_then(Value::as_str)
        .filter(|label| !label.trim().is_empty())
        .unwrap_or(UNKNOWN_CHORE_LABEL)
        .to_string();

    Ok(EffectiveSettings {
        guardian_pin,
        progress_rules,
        unknown_chore_label,
    })
}

pub fn load_settings_from_disk(data_dir: &str) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|e| {
            log::warn!("event=settings_load status=malformed error={e}");
            json!({})
        })
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(data_dir: &str, settings: Value) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let mut merged = load_settings_from_disk(data_dir).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    log::info!("event=settings_save status=ok");
    Ok(migrated)
}

fn settings_path(data_dir: &str) -> PathBuf {
    Path::new(data_dir).join(SETTINGS_FILE_NAME)
}

fn ensure_data_dir(data_dir: &str) -> Result<(), String> {
    fs::create_dir_all(data_dir).map_err(|e| format!("Failed to create data directory: {e}"))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("Failed to write settings.json: {e}"))
}

fn redact_pin(mut settings: Value) -> Value {
    if let Some(obj) = settings.as_object_mut() {
        let is_set = obj.remove("guardianPin").is_some();
        obj.insert("guardianPinSet".to_string(), json!(is_set));
    }
    settings
}

fn migrate_settings(input: Value) -> Value {
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let version = out
        .get("schema_version")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if version < 1 {
        // V1 renamed the settings-page password to the guardian PIN.
        migrate_legacy_password(&mut out);
    }

    if version < 2 {
        // V2 introduces level and badge thresholds.
        ensure_key(&mut out, "pointsPerLevel", json!(100));
        ensure_key(&mut out, "trophyThreshold", json!(500));
        ensure_key(&mut out, "medalUnsettledCount", json!(10));
    }

    deep_merge_defaults(&mut out, &default_settings());
    sanitize_settings(&mut out);
    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "guardianPin": DEFAULT_GUARDIAN_PIN,
        "pointsPerLevel": 100,
        "trophyThreshold": 500,
        "medalUnsettledCount": 10,
        "unknownChoreLabel": UNKNOWN_CHORE_LABEL
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn ensure_key(target: &mut Value, key: &str, value: Value) {
    if let Some(obj) = target.as_object_mut() {
        obj.entry(key.to_string()).or_insert(value);
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn migrate_legacy_password(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    if let Some(password) = obj.remove("password") {
        obj.entry("guardianPin".to_string()).or_insert(password);
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "pointsPerLevel", 10, 1000, 100);
    clamp_u64(obj, "trophyThreshold", 0, 100_000, 500);
    clamp_u64(obj, "medalUnsettledCount", 1, 1000, 10);

    let pin_ok = obj
        .get("guardianPin")
        .and_then(Value::as_str)
        .is_some_and(is_valid_pin);
    if !pin_ok {
        obj.insert("guardianPin".to_string(), json!(DEFAULT_GUARDIAN_PIN));
    }

    ensure_non_empty_string(obj, "unknownChoreLabel", UNKNOWN_CHORE_LABEL);
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn ensure_non_empty_string(map: &mut Map<String, Value>, key: &str, default: &str) {
    let value = map
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string();
    map.insert(key.to_string(), json!(value));
}
