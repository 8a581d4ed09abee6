pub const HEADER_CSP: &str = "Content-Security-Policy";
pub const HEADER_CSP_REPORT_ONLY: &str = "Content-Security-Policy-Report-Only";

// `HeaderName::from_static` only accepts the lowercase form.
pub(crate) const HEADER_CSP_LOWER: &str = "content-security-policy";
pub(crate) const HEADER_CSP_REPORT_ONLY_LOWER: &str = "content-security-policy-report-only";

pub(crate) const DEFAULT_SRC: &str = "default-src";
pub(crate) const SCRIPT_SRC: &str = "script-src";
pub(crate) const STYLE_SRC: &str = "style-src";
pub(crate) const IMG_SRC: &str = "img-src";
pub(crate) const CONNECT_SRC: &str = "connect-src";
pub(crate) const FONT_SRC: &str = "font-src";
pub(crate) const OBJECT_SRC: &str = "object-src";
pub(crate) const MEDIA_SRC: &str = "media-src";
pub(crate) const FRAME_SRC: &str = "frame-src";
pub(crate) const WORKER_SRC: &str = "worker-src";
pub(crate) const MANIFEST_SRC: &str = "manifest-src";
pub(crate) const CHILD_SRC: &str = "child-src";
pub(crate) const FRAME_ANCESTORS: &str = "frame-ancestors";
pub(crate) const BASE_URI: &str = "base-uri";
pub(crate) const FORM_ACTION: &str = "form-action";
pub(crate) const SANDBOX: &str = "sandbox";
pub(crate) const SCRIPT_SRC_ELEM: &str = "script-src-elem";
pub(crate) const SCRIPT_SRC_ATTR: &str = "script-src-attr";
pub(crate) const STYLE_SRC_ELEM: &str = "style-src-elem";
pub(crate) const STYLE_SRC_ATTR: &str = "style-src-attr";
pub(crate) const PREFETCH_SRC: &str = "prefetch-src";
pub(crate) const NAVIGATE_TO: &str = "navigate-to";
pub(crate) const PLUGIN_TYPES: &str = "plugin-types";
pub(crate) const UPGRADE_INSECURE_REQUESTS: &str = "upgrade-insecure-requests";
pub(crate) const BLOCK_ALL_MIXED_CONTENT: &str = "block-all-mixed-content";
pub(crate) const REQUIRE_TRUSTED_TYPES_FOR: &str = "require-trusted-types-for";
pub(crate) const TRUSTED_TYPES: &str = "trusted-types";

pub(crate) const REPORT_URI: &str = "report-uri";
pub(crate) const REPORT_TO: &str = "report-to";

/// Pseudo-directive carrying the report-only flag in pair and JSON input.
/// Never stored as a directive.
pub(crate) const REPORT_ONLY: &str = "report-only";

pub(crate) const NONE_SOURCE: &str = "'none'";
pub(crate) const SELF_SOURCE: &str = "'self'";
pub(crate) const UNSAFE_INLINE_SOURCE: &str = "'unsafe-inline'";
pub(crate) const UNSAFE_EVAL_SOURCE: &str = "'unsafe-eval'";
pub(crate) const STRICT_DYNAMIC_SOURCE: &str = "'strict-dynamic'";
pub(crate) const REPORT_SAMPLE_SOURCE: &str = "'report-sample'";
pub(crate) const WASM_UNSAFE_EVAL_SOURCE: &str = "'wasm-unsafe-eval'";
pub(crate) const UNSAFE_HASHES_SOURCE: &str = "'unsafe-hashes'";
pub(crate) const NONCE_PREFIX: &str = "'nonce-";
pub(crate) const HASH_PREFIX_SHA256: &str = "'sha256-";
pub(crate) const HASH_PREFIX_SHA384: &str = "'sha384-";
pub(crate) const HASH_PREFIX_SHA512: &str = "'sha512-";
pub(crate) const SUFFIX_QUOTE: &str = "'";

pub(crate) const DEFAULT_NONCE_LENGTH: usize = 16;
pub(crate) const DIRECTIVE_SEPARATOR: &str = "; ";
pub(crate) const TOKEN_SEPARATOR: &str = " ";
pub(crate) const META_TAG_PREFIX: &str = "<meta http-equiv=\"Content-Security-Policy\" content=\"";
pub(crate) const META_TAG_SUFFIX: &str = "\">";
pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Directive names recognised by [`resolve_directive`](crate::core::resolve_directive).
///
/// This is not a whitelist: unknown names are still stored as custom directives.
pub const KNOWN_DIRECTIVES: &[&str] = &[
    // fetch directives
    DEFAULT_SRC,
    CHILD_SRC,
    CONNECT_SRC,
    FONT_SRC,
    FRAME_SRC,
    IMG_SRC,
    MANIFEST_SRC,
    MEDIA_SRC,
    OBJECT_SRC,
    PREFETCH_SRC,
    SCRIPT_SRC,
    SCRIPT_SRC_ELEM,
    SCRIPT_SRC_ATTR,
    STYLE_SRC,
    STYLE_SRC_ELEM,
    STYLE_SRC_ATTR,
    WORKER_SRC,
    // document directives
    BASE_URI,
    PLUGIN_TYPES,
    SANDBOX,
    // navigation directives
    FORM_ACTION,
    FRAME_ANCESTORS,
    NAVIGATE_TO,
    // reporting directives
    REPORT_URI,
    REPORT_TO,
    // other
    UPGRADE_INSECURE_REQUESTS,
    BLOCK_ALL_MIXED_CONTENT,
    REQUIRE_TRUSTED_TYPES_FOR,
    TRUSTED_TYPES,
];

/// Directives that browsers ignore or reject inside a `<meta>` element.
pub const META_EXCLUDED_DIRECTIVES: &[&str] =
    &[FRAME_ANCESTORS, REPORT_URI, REPORT_TO, REPORT_ONLY, SANDBOX];

/// Hardened baseline applied by [`CspPolicy::with_defaults`](crate::CspPolicy::with_defaults).
pub const STRICT_DEFAULT_POLICY: &[(&str, &str)] = &[
    (BASE_URI, NONE_SOURCE),
    (OBJECT_SRC, NONE_SOURCE),
    (SCRIPT_SRC, STRICT_DYNAMIC_SOURCE),
    (FRAME_ANCESTORS, NONE_SOURCE),
    (DEFAULT_SRC, SELF_SOURCE),
    (REPORT_TO, "default"),
];
