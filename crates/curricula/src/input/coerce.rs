//! Lenient readers over `serde_json::Value`.
//!
//! Dataset files are hand-edited and fields drift between editions, so every
//! reader here degrades to an empty value instead of failing.

use serde_json::{Map, Value};

use crate::schema::{CompetencyId, KnowledgeItem};

/// Read a scalar as text. Numbers and booleans are stringified.
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a list of scalars. A lone scalar becomes a one-element list.
pub fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| text(Some(v))).collect(),
        Some(other) => text(Some(other)).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Read a competency identifier from a number or a string.
///
/// Whole floats such as `2.0` count as numbers.
pub fn competency_id(value: Option<&Value>) -> CompetencyId {
    match value {
        Some(Value::Number(n)) => whole_number(n)
            .map(CompetencyId::Number)
            .unwrap_or_else(|| CompetencyId::Label(n.to_string())),
        other => text(other)
            .map(|s| CompetencyId::parse(&s))
            .unwrap_or_default(),
    }
}

/// Overlay key of a competency id value: its normalized textual form.
pub fn competency_key(value: Option<&Value>) -> Option<String> {
    let key = competency_id(value).to_string();
    (!key.is_empty()).then_some(key)
}

fn whole_number(n: &serde_json::Number) -> Option<u32> {
    if let Some(n) = n.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = n.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX)).then_some(f as u32)
}

/// Read knowledge items.
///
/// Accepts an array of `{name_key, subjects_key}` objects, an array of
/// strings, or a single string.
pub fn knowledge_list(value: Option<&Value>, name_key: &str, subjects_key: &str) -> Vec<KnowledgeItem> {
    let read_one = |item: &Value| -> Option<KnowledgeItem> {
        match item {
            Value::Object(obj) => {
                let name = text(obj.get(name_key))?;
                Some(KnowledgeItem {
                    name,
                    subjects: distinct(text_list(obj.get(subjects_key))),
                })
            }
            scalar => text(Some(scalar)).map(KnowledgeItem::new),
        }
    };

    match value {
        Some(Value::Array(items)) => items.iter().filter_map(read_one).collect(),
        Some(other) => read_one(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Field lookup on an optional object.
pub fn field<'a>(obj: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    obj.and_then(|o| o.get(key))
}

/// Remove duplicates, keeping first-seen order.
pub fn distinct(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
