#![allow(dead_code)]

use csp_policy::CspPolicy;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Splits a header value back into `(name, tokens)` entries.
pub fn parse_header(value: &str) -> Vec<(String, Vec<String>)> {
    if value.is_empty() {
        return Vec::new();
    }

    value
        .split("; ")
        .map(|entry| {
            let mut parts = entry.split(' ');
            let name = parts.next().unwrap_or_default().to_string();
            (name, parts.map(str::to_string).collect())
        })
        .collect()
}

pub fn sample_policy() -> CspPolicy {
    CspPolicy::from_pairs([
        ("default-src", vec!["'self'"]),
        ("img-src", vec!["'self'", "data:"]),
        ("frame-ancestors", vec!["'none'"]),
        ("report-to", vec!["csp-endpoint"]),
    ])
    .expect("sample policy")
}
