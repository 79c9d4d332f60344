//! Key case conversion between the JSON surface (camelCase) and columns (snake_case).

use serde_json::{Map, Value};

/// "college_id" -> "collegeId"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// "collegeId" -> "college_id". A run of capitals is one word: "collegeID" -> "college_id",
/// "HTTPStatus" -> "http_status".
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = if i > 0 { chars.get(i - 1) } else { None };
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = match prev {
                Some(p) if *p == '_' => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next_lower,
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Rename all keys of a JSON object to camelCase (in place).
pub fn object_keys_to_camel_case(obj: &mut Map<String, Value>) {
    rename_keys(obj, to_camel_case);
}

/// Rename all keys of a JSON object to snake_case (in place).
pub fn object_keys_to_snake_case(obj: &mut Map<String, Value>) {
    rename_keys(obj, to_snake_case);
}

fn rename_keys(obj: &mut Map<String, Value>, f: fn(&str) -> String) {
    let keys: Vec<String> = obj.keys().cloned().collect();
    for k in keys {
        let renamed = f(&k);
        if renamed != k {
            if let Some(v) = obj.remove(&k) {
                obj.insert(renamed, v);
            }
        }
    }
}
