pub mod config;
pub mod directives;
mod import;
pub mod policy;
pub mod source;
pub mod value;

pub use config::{CspConfig, CspConfigBuilder, CspSettings};
pub use directives::{is_known_directive, known_directive, resolve_directive, to_directive_name};
pub use policy::{CspPolicy, CspPolicyBuilder};
pub use source::Source;
pub use value::{coerce_value, merge_values, DirectiveValue, IntoDirectiveValue, Token};
