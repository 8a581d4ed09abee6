pub use crate::core::{
    CspConfig, CspConfigBuilder, CspPolicy, CspPolicyBuilder, DirectiveValue, IntoDirectiveValue,
    Source,
};
pub use crate::error::CspError;
pub use crate::security::{HashAlgorithm, HashGenerator, NonceGenerator};
