//! Helpers for the `serde_json::Value` trees backing configuration layers.

use logfox_types::{LogFoxError, Result};
use serde_json::Value;

/// Deep merge two values.
/// Recursively merges objects, with overlay values taking precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay_val) => overlay_val,
    }
}

/// Get value at a path in dotted notation.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                current = arr.get(index)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Set value at a dotted path, creating intermediate objects as needed.
pub fn set_path(data: &mut Value, path: &str, value: Value) -> Result<()> {
    let parts: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(LogFoxError::Config("Empty path".to_string()));
    };
    if parts.iter().any(|p| p.is_empty()) {
        return Err(LogFoxError::Config(format!("Invalid config key '{}'", path)));
    }

    let mut current = data;
    for part in parents {
        if !current.is_object() {
            *current = Value::Object(Default::default());
        }
        current = match current {
            Value::Object(map) => map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Default::default())),
            _ => unreachable!("replaced with an object above"),
        };
    }

    if !current.is_object() {
        *current = Value::Object(Default::default());
    }
    if let Value::Object(map) = current {
        map.insert(last.to_string(), value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_overlay_wins() {
        let base = json!({"viewer": {"enabled": true, "hotkey": "F3"}, "markup": "plain"});
        let overlay = json!({"viewer": {"hotkey": "F9"}});

        let merged = deep_merge(base, overlay);
        assert_eq!(merged, json!({"viewer": {"enabled": true, "hotkey": "F9"}, "markup": "plain"}));
    }

    #[test]
    fn test_set_and_get_path() {
        let mut data = json!({});
        set_path(&mut data, "file_logging.enabled", json!(true)).unwrap();
        assert_eq!(get_path(&data, "file_logging.enabled"), Some(&json!(true)));
        assert_eq!(get_path(&data, "file_logging.missing"), None);

        assert!(set_path(&mut data, "a..b", json!(1)).is_err());
    }
}
