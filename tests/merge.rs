mod common;

use csp_policy::{CspError, CspPolicy, CspPolicyBuilder, DirectiveValue};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    fn route_override() -> CspPolicy {
        CspPolicyBuilder::new()
            .pair("img-src", ["https://cdn.example"])
            .pair("connect-src", "https://api.example")
            .build()
            .unwrap()
    }

    #[test]
    fn test_merge_returns_new_policy_and_keeps_base() {
        let base = common::sample_policy();
        let before = base.clone();

        let merged = base.merge(&route_override());

        assert_eq!(base, before);
        assert_ne!(merged, base);
    }

    #[test]
    fn test_merge_order_and_values() {
        let merged = common::sample_policy().merge(&route_override());

        assert_eq!(
            merged.header_value(),
            "default-src 'self'; img-src 'self' data: https://cdn.example; \
             frame-ancestors 'none'; report-to csp-endpoint; connect-src https://api.example"
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let base = common::sample_policy();
        let over = route_override();

        let once = base.merge(&over);
        let twice = once.merge(&over);

        assert_eq!(once, twice);
        assert_eq!(once.header_value(), twice.header_value());
    }

    #[test]
    fn test_merge_report_only_only_when_explicit() {
        let mut base = common::sample_policy();
        base.set_report_only(true);

        let merged = base.merge(&route_override());
        assert!(merged.is_report_only());

        let mut explicit = route_override();
        explicit.set_report_only(false);
        assert!(!base.merge(&explicit).is_report_only());

        assert!(!base.merge_with(&route_override(), Some(false)).is_report_only());
        assert!(base.merge_with(&route_override(), None).is_report_only());
    }

    #[test]
    fn test_merge_pairs_false_unsets() {
        let base = common::sample_policy();

        let merged = base
            .merge_pairs([("frame_ancestors", json!(false)), ("img_src", json!([]))])
            .unwrap();

        assert!(!merged.contains("frame-ancestors"));
        assert!(!merged.contains("img-src"));
        assert!(base.contains("frame-ancestors"));
    }

    #[test]
    fn test_merge_pairs_scalar_replaces() {
        let merged = common::sample_policy()
            .merge_pairs([("default_src", json!("'none'")), ("report_only", json!(true))])
            .unwrap();

        assert_eq!(merged.get("default-src"), Some(&DirectiveValue::single("'none'")));
        assert!(merged.is_report_only());
    }

    #[test]
    fn test_merge_pairs_rejects_bad_shape() {
        let result = common::sample_policy().merge_pairs([("img-src", json!({"a": 1}))]);

        assert!(matches!(result, Err(CspError::StructuralInput(_))));
    }

    #[test]
    fn test_merge_onto_defaults() {
        let merged = CspPolicy::with_defaults().merge(
            &CspPolicy::from_pairs([("script-src", vec!["'strict-dynamic'", "'nonce-r4nd'"])])
                .unwrap(),
        );

        assert_eq!(
            merged.get("script_src"),
            Some(&DirectiveValue::multi(["'strict-dynamic'", "'nonce-r4nd'"]))
        );
        assert_eq!(merged.len(), 6);
    }
}
