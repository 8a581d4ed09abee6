use csp_policy::core::is_known_directive;
use csp_policy::{
    coerce_value, merge_values, resolve_directive, to_directive_name, CspError, DirectiveValue,
};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("script_src", "script-src" ; "underscores")]
    #[test_case("script-src", "script-src" ; "already hyphenated")]
    #[test_case("upgrade_insecure_requests", "upgrade-insecure-requests" ; "flag directive")]
    #[test_case("x_custom_thing", "x-custom-thing" ; "custom directive")]
    #[test_case("Script_Src", "script-src" ; "mixed case underscores")]
    #[test_case("FRAME-ANCESTORS", "frame-ancestors" ; "upper case")]
    fn test_to_directive_name(input: &str, expected: &str) {
        assert_eq!(to_directive_name(input), expected);
    }

    #[test]
    fn test_known_directives() {
        assert!(is_known_directive("default-src"));
        assert!(is_known_directive("report_to"));
        assert!(is_known_directive("sandbox"));
        assert!(is_known_directive("Report_To"));
        assert!(!is_known_directive("not-a-directive"));
    }

    #[test]
    fn test_resolve_directive_known_and_custom() {
        assert_eq!(resolve_directive("style_src_elem", None), "style-src-elem");
        assert_eq!(resolve_directive("my_directive", None), "my-directive");
        assert_eq!(
            resolve_directive("my_directive", Some("default-src")),
            "default-src"
        );
    }

    #[test_case(json!("'self'"), DirectiveValue::single("'self'") ; "string")]
    #[test_case(json!(true), DirectiveValue::Flag(true) ; "true flag")]
    #[test_case(json!(false), DirectiveValue::Flag(false) ; "false flag")]
    #[test_case(json!(["a", "b", "a"]), DirectiveValue::multi(["a", "b", "a"]) ; "list keeps duplicates")]
    #[test_case(json!([]), DirectiveValue::multi(Vec::<&'static str>::new()) ; "empty list")]
    fn test_coerce_value_accepts(input: serde_json::Value, expected: DirectiveValue) {
        assert_eq!(coerce_value(&input).unwrap(), expected);
    }

    #[test_case(json!(1) ; "number")]
    #[test_case(json!(null) ; "null")]
    #[test_case(json!({"a": "b"}) ; "object")]
    #[test_case(json!(["'self'", 2]) ; "mixed list")]
    #[test_case(json!([["nested"]]) ; "nested list")]
    fn test_coerce_value_rejects(input: serde_json::Value) {
        assert!(matches!(
            coerce_value(&input),
            Err(CspError::StructuralInput(_))
        ));
    }

    #[test]
    fn test_unset_values() {
        assert!(DirectiveValue::Unset.is_unset());
        assert!(DirectiveValue::Flag(false).is_unset());
        assert!(DirectiveValue::multi(Vec::<String>::new()).is_unset());
        assert!(!DirectiveValue::Flag(true).is_unset());
        assert!(!DirectiveValue::single("").is_unset());
    }

    #[test]
    fn test_merge_lists_concatenate() {
        let base = DirectiveValue::multi(["'self'", "data:"]);
        let over = DirectiveValue::multi(["data:", "https:"]);

        assert_eq!(
            merge_values(&base, &over),
            DirectiveValue::multi(["'self'", "data:", "https:"])
        );
    }

    #[test]
    fn test_merge_false_unsets() {
        let base = DirectiveValue::multi(["'self'"]);

        assert!(merge_values(&base, &DirectiveValue::Flag(false)).is_unset());
    }

    #[test]
    fn test_merge_scalar_replaces() {
        let base = DirectiveValue::multi(["'self'"]);
        let over = DirectiveValue::single("'none'");

        assert_eq!(merge_values(&base, &over), over);
        assert_eq!(
            merge_values(&DirectiveValue::single("a"), &DirectiveValue::multi(["b"])),
            DirectiveValue::multi(["b"])
        );
    }
}
