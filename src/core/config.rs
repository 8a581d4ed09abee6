use crate::constants::{META_EXCLUDED_DIRECTIVES, SCRIPT_SRC, STYLE_SRC};
use crate::core::policy::CspPolicy;
use crate::error::CspError;
use crate::security::nonce::{nonce_token, NonceGenerator};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{borrow::Cow, sync::Arc};

/// Deserializable form of a [`CspConfig`].
///
/// ```json
/// { "use_defaults": true, "nonce_length": 16, "directives": { "img_src": ["'self'", "data:"] } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CspSettings {
    pub report_only: Option<bool>,
    pub use_defaults: bool,
    pub nonce_length: Option<usize>,
    pub meta_exclusions: Option<Vec<String>>,
    pub directives: Map<String, Value>,
}

/// Shared, read-only policy template plus the pieces a host needs per request.
#[derive(Debug, Clone)]
pub struct CspConfig {
    policy: Arc<CspPolicy>,
    nonce_generator: Option<Arc<NonceGenerator>>,
    meta_exclusions: Arc<[Cow<'static, str>]>,
}

impl CspConfig {
    pub fn new(policy: CspPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
            nonce_generator: None,
            meta_exclusions: META_EXCLUDED_DIRECTIVES
                .iter()
                .map(|name| Cow::Borrowed(*name))
                .collect(),
        }
    }

    pub fn from_settings(settings: CspSettings) -> Result<Self, CspError> {
        let base = if settings.use_defaults {
            CspPolicy::with_defaults()
        } else {
            CspPolicy::new()
        };
        // `false` entries must be able to switch off a default directive.
        let mut policy = base.merge_pairs(settings.directives.iter())?;
        if let Some(report_only) = settings.report_only {
            policy.set_report_only(report_only);
        }

        let mut builder = CspConfigBuilder::new().policy(policy);
        if let Some(length) = settings.nonce_length {
            builder = builder.with_nonce_generator(length);
        }
        if let Some(exclusions) = settings.meta_exclusions {
            builder = builder.meta_exclusions(exclusions);
        }
        Ok(builder.build())
    }

    pub fn from_settings_json(document: &str) -> Result<Self, CspError> {
        let settings: CspSettings = serde_json::from_str(document)?;
        Self::from_settings(settings)
    }

    #[inline]
    pub fn policy(&self) -> Arc<CspPolicy> {
        self.policy.clone()
    }

    /// The template with `overrides` merged on top. The template is untouched.
    #[inline]
    pub fn policy_for(&self, overrides: &CspPolicy) -> CspPolicy {
        self.policy.merge(overrides)
    }

    pub fn generate_nonce(&self) -> Result<Option<String>, CspError> {
        self.nonce_generator
            .as_ref()
            .map(|generator| generator.generate())
            .transpose()
    }

    /// Per-request copy of the template carrying a fresh nonce.
    ///
    /// The `'nonce-…'` token is appended to `script-src` (created if absent)
    /// and to `style-src` when the template has one. Returns `None` for the
    /// nonce when no generator is configured.
    pub fn policy_with_nonce(&self) -> Result<(CspPolicy, Option<String>), CspError> {
        let mut policy = self.policy.as_ref().clone();
        let Some(nonce) = self.generate_nonce()? else {
            return Ok((policy, None));
        };

        let token = nonce_token(&nonce);
        policy.append_token(SCRIPT_SRC, token.clone());
        if policy.contains(STYLE_SRC) {
            policy.append_token(STYLE_SRC, token);
        }
        Ok((policy, Some(nonce)))
    }

    #[inline]
    pub fn meta_exclusions(&self) -> &[Cow<'static, str>] {
        &self.meta_exclusions
    }

    /// Meta rendering of `policy` with this configuration's exclusion list.
    #[inline]
    pub fn meta_tag(&self, policy: &CspPolicy) -> String {
        policy.meta_tag_excluding(self.meta_exclusions.iter())
    }
}

#[derive(Debug, Default)]
pub struct CspConfigBuilder {
    policy: Option<CspPolicy>,
    use_defaults: bool,
    nonce_length: Option<usize>,
    nonce_generator: Option<Arc<NonceGenerator>>,
    meta_exclusions: Option<Vec<Cow<'static, str>>>,
}

impl CspConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn policy(mut self, policy: CspPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Lay the configured policy over the strict defaults.
    #[inline]
    pub fn use_defaults(mut self) -> Self {
        self.use_defaults = true;
        self
    }

    #[inline]
    pub fn with_nonce_generator(mut self, length: usize) -> Self {
        self.nonce_length = Some(length);
        self
    }

    #[inline]
    pub fn with_prebuilt_nonce_generator(mut self, generator: Arc<NonceGenerator>) -> Self {
        self.nonce_generator = Some(generator);
        self
    }

    pub fn meta_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.meta_exclusions = Some(exclusions.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> CspConfig {
        let policy = self.policy.unwrap_or_default();
        let policy = if self.use_defaults {
            CspPolicy::with_defaults().merge(&policy)
        } else {
            policy
        };
        let mut config = CspConfig::new(policy);

        if let Some(generator) = self.nonce_generator {
            config.nonce_generator = Some(generator);
        } else if let Some(length) = self.nonce_length {
            config.nonce_generator = Some(Arc::new(NonceGenerator::new(length)));
        }

        if let Some(exclusions) = self.meta_exclusions {
            config.meta_exclusions = exclusions.into();
        }

        config
    }
}
