use crate::constants::{
    self, DEFAULT_BUFFER_CAPACITY, DIRECTIVE_SEPARATOR, HEADER_CSP, HEADER_CSP_LOWER,
    HEADER_CSP_REPORT_ONLY, HEADER_CSP_REPORT_ONLY_LOWER, META_EXCLUDED_DIRECTIVES,
    META_TAG_PREFIX, META_TAG_SUFFIX, REPORT_ONLY, STRICT_DEFAULT_POLICY,
};
use crate::core::directives::{canonical_key, known_directive, to_directive_name};
use crate::core::value::{merge_values, DirectiveValue, IntoDirectiveValue, Token};
use crate::error::CspError;
use actix_web::http::header::{
    HeaderName, HeaderValue, InvalidHeaderValue, TryIntoHeaderPair,
};
use bytes::Bytes;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

/// An ordered set of CSP directives plus the report-only switch.
///
/// Keys are always canonical (hyphenated) directive names and values are
/// always normalized. Directive order is insertion order and drives the
/// order of the serialized header.
#[derive(Debug, Clone, Default)]
pub struct CspPolicy {
    directives: IndexMap<Cow<'static, str>, DirectiveValue>,
    // `None` until set explicitly, so a merge can tell "not given" from `false`.
    report_only: Option<bool>,
}

impl CspPolicy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy pre-populated with [`STRICT_DEFAULT_POLICY`].
    pub fn with_defaults() -> Self {
        let mut policy = Self::new();
        for (name, token) in STRICT_DEFAULT_POLICY {
            policy.insert(
                Cow::Borrowed(*name),
                DirectiveValue::Single(Cow::Borrowed(*token)),
            );
        }
        policy
    }

    /// Builds a policy from ordered `(key, value)` pairs. Later pairs replace
    /// earlier ones with the same canonical key.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CspError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoDirectiveValue,
    {
        let mut policy = Self::new();
        for (key, value) in pairs {
            policy.set(key.as_ref(), value)?;
        }
        Ok(policy)
    }

    /// Sets a directive after normalizing both key and value.
    ///
    /// Unset values (`false`, empty lists) remove the directive. The
    /// `report-only` key toggles [`is_report_only`](Self::is_report_only)
    /// instead of being stored and only accepts a boolean.
    pub fn set(
        &mut self,
        name: impl AsRef<str>,
        value: impl IntoDirectiveValue,
    ) -> Result<&mut Self, CspError> {
        let value = value.into_directive_value()?;
        self.set_value(canonical_key(name.as_ref()), value)?;
        Ok(self)
    }

    pub(crate) fn set_value(
        &mut self,
        key: Cow<'static, str>,
        value: DirectiveValue,
    ) -> Result<(), CspError> {
        if key == REPORT_ONLY {
            self.report_only = Some(report_only_flag(&value)?);
            return Ok(());
        }

        if value.is_unset() {
            if self.directives.shift_remove(&*key).is_some() {
                log::debug!("Removed CSP directive '{}'", key);
            }
        } else {
            self.insert(key, value);
        }
        Ok(())
    }

    fn insert(&mut self, key: Cow<'static, str>, value: DirectiveValue) {
        if matches!(key, Cow::Owned(_)) && !self.directives.contains_key(&*key) {
            log::debug!("Storing custom CSP directive '{}'", key);
        }
        self.directives.insert(key, value);
    }

    /// Appends a token to a directive, creating it if absent.
    pub fn append_token(&mut self, name: impl AsRef<str>, token: impl Into<Token>) -> &mut Self {
        let key = canonical_key(name.as_ref());
        if key == REPORT_ONLY {
            return self;
        }

        match self.directives.get_mut(&*key) {
            Some(value) => value.push_token(token),
            None => self.insert(key, DirectiveValue::Single(token.into())),
        }
        self
    }

    #[inline]
    pub fn set_report_only(&mut self, report_only: bool) -> &mut Self {
        self.report_only = Some(report_only);
        self
    }

    /// Reads a directive by canonical or identifier-style name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&DirectiveValue> {
        self.directives.get(&*to_directive_name(name))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<DirectiveValue> {
        self.directives.shift_remove(&*to_directive_name(name))
    }

    #[inline]
    pub fn is_report_only(&self) -> bool {
        self.report_only.unwrap_or(false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    #[inline]
    pub fn directives(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.directives
            .iter()
            .map(|(name, value)| (&**name, value))
    }

    #[inline]
    pub fn contains_nonce(&self) -> bool {
        self.directives.values().any(|value| {
            value
                .tokens()
                .iter()
                .any(|t| t.starts_with(constants::NONCE_PREFIX))
        })
    }

    /// Returns `self` overlaid with `other`; neither input is modified.
    ///
    /// Keys only in `self` keep their relative order, keys only in `other`
    /// are appended. Shared keys combine through [`merge_values`]. The
    /// report-only flag comes from `other` only if it was set there
    /// explicitly.
    pub fn merge(&self, other: &CspPolicy) -> CspPolicy {
        let mut merged = self.clone();
        for (name, value) in &other.directives {
            merged.merge_entry(name.clone(), value);
        }
        if other.report_only.is_some() {
            merged.report_only = other.report_only;
        }
        log::trace!(
            "Merged {} CSP directives into {} -> {}",
            other.len(),
            self.len(),
            merged.len()
        );
        merged
    }

    /// Like [`merge`](Self::merge) but with the report-only flag given by the caller.
    pub fn merge_with(&self, other: &CspPolicy, report_only: Option<bool>) -> CspPolicy {
        let mut merged = self.merge(other);
        if report_only.is_some() {
            merged.report_only = report_only;
        }
        merged
    }

    /// Overlays raw `(key, value)` pairs. Fails without producing a policy if
    /// any value has an unsupported shape.
    pub fn merge_pairs<I, K, V>(&self, pairs: I) -> Result<CspPolicy, CspError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoDirectiveValue,
    {
        let mut merged = self.clone();
        for (key, value) in pairs {
            let key = canonical_key(key.as_ref());
            let value = value.into_directive_value()?;
            if key == REPORT_ONLY {
                merged.report_only = Some(report_only_flag(&value)?);
            } else {
                merged.merge_entry(key, &value);
            }
        }
        Ok(merged)
    }

    fn merge_entry(&mut self, key: Cow<'static, str>, value: &DirectiveValue) {
        let merged = match self.directives.get(&*key) {
            Some(base) => merge_values(base, value),
            None => value.clone(),
        };

        if merged.is_unset() {
            self.directives.shift_remove(&*key);
        } else {
            self.insert(key, merged);
        }
    }

    /// Every set directive rendered as `name tok tok`, in policy order.
    pub fn rendered_directives(&self) -> impl Iterator<Item = String> + '_ {
        self.directives.iter().filter_map(|(name, value)| {
            if value.is_unset() {
                return None;
            }
            let mut out = String::with_capacity(name.len() + value.estimated_size());
            value.write_directive(name, &mut out);
            Some(out)
        })
    }

    fn estimated_size(&self) -> usize {
        self.directives
            .iter()
            .map(|(name, value)| name.len() + value.estimated_size() + DIRECTIVE_SEPARATOR.len())
            .sum()
    }

    fn write_header<F>(&self, out: &mut String, mut skip: F)
    where
        F: FnMut(&str) -> bool,
    {
        let mut first = true;
        for (name, value) in &self.directives {
            if value.is_unset() || skip(&**name) {
                continue;
            }
            if !first {
                out.push_str(DIRECTIVE_SEPARATOR);
            }
            value.write_directive(name, out);
            first = false;
        }
    }

    /// Header value: rendered directives joined by `"; "`.
    pub fn header_value(&self) -> String {
        let mut out = String::with_capacity(self.estimated_size().max(DEFAULT_BUFFER_CAPACITY));
        self.write_header(&mut out, |_| false);
        out
    }

    #[inline]
    pub fn header_name(&self) -> &'static str {
        if self.is_report_only() {
            HEADER_CSP_REPORT_ONLY
        } else {
            HEADER_CSP
        }
    }

    #[inline]
    pub fn header_pair(&self) -> (&'static str, String) {
        (self.header_name(), self.header_value())
    }

    #[inline]
    pub fn to_header_name(&self) -> HeaderName {
        if self.is_report_only() {
            HeaderName::from_static(HEADER_CSP_REPORT_ONLY_LOWER)
        } else {
            HeaderName::from_static(HEADER_CSP_LOWER)
        }
    }

    pub fn to_header_value(&self) -> Result<HeaderValue, CspError> {
        HeaderValue::from_maybe_shared(Bytes::from(self.header_value()))
            .map_err(|e| CspError::InvalidHeaderValue(e.to_string()))
    }

    /// `<meta http-equiv>` rendering without the directives browsers ignore there.
    #[inline]
    pub fn meta_tag(&self) -> String {
        self.meta_tag_excluding(META_EXCLUDED_DIRECTIVES)
    }

    /// Like [`meta_tag`](Self::meta_tag) with a caller-supplied exclusion list.
    ///
    /// The meta element has no report-only variant, so the enforcing header
    /// name is always used.
    pub fn meta_tag_excluding<I, S>(&self, exclusions: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.is_report_only() {
            log::warn!("Rendering a report-only CSP as a <meta> tag; it will be enforced");
        }

        let excluded: FxHashSet<String> = exclusions
            .into_iter()
            .map(|name| to_directive_name(name.as_ref()).into_owned())
            .collect();

        let mut content = String::with_capacity(self.estimated_size());
        self.write_header(&mut content, |name| excluded.contains(name));

        let mut tag = String::with_capacity(
            META_TAG_PREFIX.len() + content.len() + META_TAG_SUFFIX.len(),
        );
        tag.push_str(META_TAG_PREFIX);
        push_attribute_escaped(&mut tag, &content);
        tag.push_str(META_TAG_SUFFIX);
        tag
    }

    /// Structured view: directive name to space-joined tokens. Flags map to
    /// an empty string.
    pub fn to_map(&self) -> IndexMap<String, String> {
        self.directives
            .iter()
            .filter(|(_, value)| !value.is_unset())
            .map(|(name, value)| (name.to_string(), value.rendered()))
            .collect()
    }

    /// Names of stored directives missing from the known directive table.
    pub fn custom_directives(&self) -> impl Iterator<Item = &str> {
        self.directives
            .keys()
            .map(|name| &**name)
            .filter(|name| known_directive(name).is_none())
    }
}

fn report_only_flag(value: &DirectiveValue) -> Result<bool, CspError> {
    match value {
        DirectiveValue::Flag(flag) => Ok(*flag),
        DirectiveValue::Unset => Ok(false),
        other => Err(CspError::structural(format_args!(
            "report-only expects a boolean, got {:?}",
            other
        ))),
    }
}

fn push_attribute_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}

impl fmt::Display for CspPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}

// Directive order is part of the rendered header, so equality is order-sensitive.
impl PartialEq for CspPolicy {
    fn eq(&self, other: &Self) -> bool {
        self.report_only == other.report_only && self.directives.iter().eq(other.directives.iter())
    }
}

impl Eq for CspPolicy {}

impl Hash for CspPolicy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.directives.len().hash(state);
        for (name, value) in &self.directives {
            name.hash(state);
            value.hash(state);
        }
        self.report_only.hash(state);
    }
}

impl TryIntoHeaderPair for &CspPolicy {
    type Error = InvalidHeaderValue;

    fn try_into_pair(self) -> Result<(HeaderName, HeaderValue), Self::Error> {
        let value = HeaderValue::from_maybe_shared(Bytes::from(self.header_value()))?;
        Ok((self.to_header_name(), value))
    }
}

impl TryIntoHeaderPair for CspPolicy {
    type Error = InvalidHeaderValue;

    #[inline]
    fn try_into_pair(self) -> Result<(HeaderName, HeaderValue), Self::Error> {
        (&self).try_into_pair()
    }
}

/// Ordered builder: positional pairs first, then named overrides.
///
/// Overrides are applied after every pair, so an override always wins over
/// a pair for the same directive regardless of call order. Input errors are
/// kept until [`build`](Self::build) so a failed build yields no policy.
#[derive(Debug, Default)]
pub struct CspPolicyBuilder {
    use_defaults: bool,
    pairs: Vec<(Cow<'static, str>, DirectiveValue)>,
    overrides: Vec<(Cow<'static, str>, DirectiveValue)>,
    report_only: Option<bool>,
    error: Option<CspError>,
}

impl CspPolicyBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from [`STRICT_DEFAULT_POLICY`] instead of an empty policy.
    #[inline]
    pub fn use_defaults(mut self) -> Self {
        self.use_defaults = true;
        self
    }

    fn record(
        mut self,
        key: &str,
        value: impl IntoDirectiveValue,
        overriding: bool,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }

        match value.into_directive_value() {
            Ok(value) => {
                let entry = (canonical_key(key), value);
                if overriding {
                    self.overrides.push(entry);
                } else {
                    self.pairs.push(entry);
                }
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    #[inline]
    pub fn pair(self, key: impl AsRef<str>, value: impl IntoDirectiveValue) -> Self {
        self.record(key.as_ref(), value, false)
    }

    pub fn pairs<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoDirectiveValue,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (key, value)| builder.pair(key, value))
    }

    #[inline]
    pub fn override_with(self, key: impl AsRef<str>, value: impl IntoDirectiveValue) -> Self {
        self.record(key.as_ref(), value, true)
    }

    pub fn overrides<I, K, V>(self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoDirectiveValue,
    {
        overrides
            .into_iter()
            .fold(self, |builder, (key, value)| builder.override_with(key, value))
    }

    #[inline]
    pub fn report_only(mut self, enabled: bool) -> Self {
        self.report_only = Some(enabled);
        self
    }

    pub fn upgrade_insecure_requests(self) -> Self {
        self.pair(constants::UPGRADE_INSECURE_REQUESTS, true)
    }

    pub fn block_all_mixed_content(self) -> Self {
        self.pair(constants::BLOCK_ALL_MIXED_CONTENT, true)
    }

    pub fn build(self) -> Result<CspPolicy, CspError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let mut policy = if self.use_defaults {
            CspPolicy::with_defaults()
        } else {
            CspPolicy::new()
        };

        for (key, value) in self.pairs.into_iter().chain(self.overrides) {
            policy.set_value(key, value)?;
        }

        if let Some(report_only) = self.report_only {
            policy.set_report_only(report_only);
        }

        Ok(policy)
    }
}

macro_rules! directive_setters {
    ($($method:ident => $directive_name:expr),* $(,)?) => {
        impl CspPolicyBuilder {
            $(
                #[inline]
                pub fn $method(self, value: impl IntoDirectiveValue) -> Self {
                    self.pair($directive_name, value)
                }
            )*
        }
    };
}

directive_setters! {
    default_src => constants::DEFAULT_SRC,
    script_src => constants::SCRIPT_SRC,
    script_src_elem => constants::SCRIPT_SRC_ELEM,
    script_src_attr => constants::SCRIPT_SRC_ATTR,
    style_src => constants::STYLE_SRC,
    style_src_elem => constants::STYLE_SRC_ELEM,
    style_src_attr => constants::STYLE_SRC_ATTR,
    img_src => constants::IMG_SRC,
    connect_src => constants::CONNECT_SRC,
    font_src => constants::FONT_SRC,
    object_src => constants::OBJECT_SRC,
    media_src => constants::MEDIA_SRC,
    frame_src => constants::FRAME_SRC,
    worker_src => constants::WORKER_SRC,
    manifest_src => constants::MANIFEST_SRC,
    child_src => constants::CHILD_SRC,
    frame_ancestors => constants::FRAME_ANCESTORS,
    base_uri => constants::BASE_URI,
    form_action => constants::FORM_ACTION,
    sandbox => constants::SANDBOX,
    report_uri => constants::REPORT_URI,
    report_to => constants::REPORT_TO,
}
