//! Builders for serialized test messages.

use crate::config::DEFAULT_NAMESPACE;

pub(crate) fn php_str(value: &str) -> String {
    format!("s:{}:\"{}\";", value.len(), value)
}

pub(crate) fn php_int(value: i64) -> String {
    format!("i:{value};")
}

pub(crate) fn php_bool(value: bool) -> String {
    format!("b:{};", u8::from(value))
}

pub(crate) fn php_array(entries: &[(&str, String)]) -> String {
    let body: String = entries
        .iter()
        .map(|(k, v)| format!("{}{}", php_str(k), v))
        .collect();
    format!("a:{}:{{{}}}", entries.len(), body)
}

pub(crate) fn php_object(class: &str, entries: &[(String, String)]) -> String {
    let body: String = entries
        .iter()
        .map(|(k, v)| format!("{}{}", php_str(k), v))
        .collect();
    format!(
        "O:{}:\"{}\":{}:{{{}}}",
        class.len(),
        class,
        entries.len(),
        body
    )
}

pub(crate) fn php_datetime(date: &str) -> String {
    php_object(
        "DateTime",
        &[
            ("date".to_string(), php_str(date)),
            ("timezone_type".to_string(), php_int(3)),
            ("timezone".to_string(), php_str("UTC")),
        ],
    )
}

pub(crate) fn private_key(field: &str) -> String {
    format!("\0{DEFAULT_NAMESPACE}\0{field}")
}

/// Wraps private sitecheck properties into a full `{result: Object}` message.
pub(crate) fn sitecheck_message(fields: &[(&str, String)]) -> Vec<u8> {
    let entries: Vec<(String, String)> = fields
        .iter()
        .map(|(name, value)| (private_key(name), value.clone()))
        .collect();
    php_array(&[("result", php_object(DEFAULT_NAMESPACE, &entries))]).into_bytes()
}

/// The standard green check for `https://example.org/` hosted by provider 42.
pub(crate) fn green_fields() -> Vec<(&'static str, String)> {
    vec![
        ("ip", php_str("203.0.113.5")),
        ("checkedUrl", php_str("https://example.org/")),
        ("data", php_bool(true)),
        ("green", php_bool(true)),
        ("cached", php_bool(false)),
        ("idHostingProvider", php_int(42)),
        (
            "matchtype",
            php_array(&[("type", php_str("whois")), ("id", php_int(7))]),
        ),
        ("checkedAt", php_datetime("2019-11-14 10:00:00.000000")),
    ]
}

/// Replaces (or appends) one field in a field list.
pub(crate) fn with_field(
    mut fields: Vec<(&'static str, String)>,
    name: &'static str,
    value: String,
) -> Vec<(&'static str, String)> {
    match fields.iter_mut().find(|(n, _)| *n == name) {
        Some(entry) => entry.1 = value,
        None => fields.push((name, value)),
    }
    fields
}

/// Drops one field from a field list.
pub(crate) fn without_field(
    fields: Vec<(&'static str, String)>,
    name: &str,
) -> Vec<(&'static str, String)> {
    fields.into_iter().filter(|(n, _)| *n != name).collect()
}
