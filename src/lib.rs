pub mod constants;
pub mod core;
pub mod error;
pub mod prelude;
pub mod security;

// Re-export commonly used types for convenience
pub use crate::core::{
    coerce_value, merge_values, resolve_directive, to_directive_name, CspConfig, CspConfigBuilder,
    CspPolicy, CspPolicyBuilder, CspSettings, DirectiveValue, IntoDirectiveValue, Source,
};
pub use constants::{
    HEADER_CSP, HEADER_CSP_REPORT_ONLY, KNOWN_DIRECTIVES, META_EXCLUDED_DIRECTIVES,
    STRICT_DEFAULT_POLICY,
};
pub use error::CspError;
pub use security::{nonce_token, HashAlgorithm, HashGenerator, NonceGenerator};
