use serde_json;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap()
}

/// Qualified names become identifier-safe by replacing dots.
pub fn qname_of(name: &str) -> String {
    name.replace('.', "_")
}
