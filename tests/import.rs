mod common;

use csp_policy::{CspError, CspPolicy};
use std::{fs, path::PathBuf};

fn temp_policy_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "csp-policy-{}-{}.json",
        name,
        std::process::id()
    ));
    fs::write(&path, contents).expect("write temp policy");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "default_src": "'self'",
        "img-src": ["'self'", "data:"],
        "upgrade_insecure_requests": true,
        "block-all-mixed-content": false
    }"#;

    #[test]
    fn test_from_json_str_keeps_document_order() {
        common::init_logger();
        let policy = CspPolicy::from_json_str(DOCUMENT).unwrap();

        assert_eq!(
            policy.header_value(),
            "default-src 'self'; img-src 'self' data:; upgrade-insecure-requests"
        );
        assert!(!policy.contains("block-all-mixed-content"));
    }

    #[test]
    fn test_from_json_report_only_entry() {
        let policy =
            CspPolicy::from_json_str(r#"{"report_only": true, "default-src": "'self'"}"#).unwrap();

        assert!(policy.is_report_only());
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn test_from_json_file() {
        let path = temp_policy_file("file", DOCUMENT);

        let from_file = CspPolicy::from_json_file(&path).unwrap();
        let from_dispatch = CspPolicy::from_json(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(from_file, CspPolicy::from_json_str(DOCUMENT).unwrap());
        assert_eq!(from_file, from_dispatch);
    }

    #[test]
    fn test_from_json_dispatches_raw_documents() {
        let policy = CspPolicy::from_json("  {\"script_src\": \"'none'\"}").unwrap();

        assert_eq!(policy.header_value(), "script-src 'none'");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CspPolicy::from_json_file("/nonexistent/csp-policy.json");

        assert!(matches!(result, Err(CspError::Io(_))));
    }

    #[test]
    fn test_malformed_document_is_import_error() {
        let result = CspPolicy::from_json_str("{\"default-src\": ");

        assert!(matches!(result, Err(CspError::Import(_))));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let result = CspPolicy::from_json_str(r#"["default-src", "'self'"]"#);

        assert!(matches!(result, Err(CspError::ImportShape(_))));
    }

    #[test]
    fn test_unsupported_value_in_document() {
        let result = CspPolicy::from_json_str(r#"{"default-src": "'self'", "img-src": 7}"#);

        assert!(matches!(result, Err(CspError::StructuralInput(_))));
    }
}
