//! # Error Bodies
//!
//! The backend answers failures with Django REST Framework bodies:
//!
//! * `{"detail": "No encontrado."}`
//! * `{"cuit": ["Ya existe una empresa con este CUIT."], "email": ["..."]}`
//! * `{"non_field_errors": ["..."]}`
//! * `{"contactos": [{"email": ["Correo inválido."]}]}`
//!
//! [`combined_message`] flattens all of them into one line for the user, and
//! [`is_silent`] decides which failures are expected enough to keep quiet about.

use serde_json::Value;

const DIRECT_KEYS: [&str; 3] = ["detail", "message", "error"];
const UNPREFIXED_KEYS: [&str; 2] = ["non_field_errors", "__all__"];
const SEPARATOR: &str = "; ";

const AUTH_HINTS: [&str; 8] = [
    "credenciales",
    "credentials",
    "token",
    "autenticación",
    "autenticacion",
    "authentication",
    "not authenticated",
    "no autenticado",
];
const NOT_FOUND_HINTS: [&str; 3] = ["no encontrado", "not found", "no existe"];

/// Flattens an error body into a single message, or `None` when the body has nothing readable.
pub fn combined_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return plain_text(trimmed);
    };

    let mut parts: Vec<String> = Vec::new();
    collect(&value, None, &mut parts);

    if parts.is_empty() { None } else { Some(parts.join(SEPARATOR)) }
}

fn collect(value: &Value, prefix: Option<&str>, parts: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if prefix.is_none() {
                for key in DIRECT_KEYS {
                    if let Some(Value::String(msg)) = map.get(key) {
                        parts.push(msg.clone());
                        return;
                    }
                }
            }
            for (key, inner) in map {
                if key == "code" || key == "status_code" {
                    continue;
                }
                let path = if UNPREFIXED_KEYS.contains(&key.as_str()) {
                    prefix.map(str::to_string)
                } else {
                    Some(match prefix {
                        Some(p) => format!("{p}.{key}"),
                        None => key.clone(),
                    })
                };
                collect(inner, path.as_deref(), parts);
            }
        }
        Value::Array(items) => {
            let texts: Vec<String> = items.iter().filter_map(scalar).collect();
            if !texts.is_empty() {
                parts.push(labelled(prefix, &texts.join(", ")));
            }
            for (idx, item) in items.iter().enumerate() {
                if item.is_object() {
                    let path = match prefix {
                        Some(p) => format!("{p}[{idx}]"),
                        None => format!("[{idx}]"),
                    };
                    collect(item, Some(&path), parts);
                }
            }
        }
        other => {
            if let Some(text) = scalar(other) {
                parts.push(labelled(prefix, &text));
            }
        }
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn labelled(prefix: Option<&str>, text: &str) -> String {
    match prefix {
        Some(p) => format!("{p}: {text}"),
        None => text.to_string(),
    }
}

/// HTML error pages are not worth showing; short plain text is.
fn plain_text(body: &str) -> Option<String> {
    if body.starts_with('<') {
        return None;
    }
    let line = body.lines().next().unwrap_or(body).trim();
    Some(line.chars().take(300).collect())
}

/// Expected failures that should not be reported as errors: authentication-shaped
/// 401s (bad credentials, missing or expired token) and "not found" 404s.
pub fn is_silent(status: u16, message: Option<&str>) -> bool {
    let lower = message.map(str::to_lowercase);
    let mentions = |hints: &[&str]| {
        lower
            .as_deref()
            .is_some_and(|msg| hints.iter().any(|hint| msg.contains(hint)))
    };

    match status {
        401 => mentions(&AUTH_HINTS[..]),
        404 => message.is_none() || mentions(&NOT_FOUND_HINTS[..]),
        _ => false,
    }
}
