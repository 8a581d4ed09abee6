use crate::constants::TOKEN_SEPARATOR;
use crate::core::source::Source;
use crate::error::CspError;
use indexmap::IndexSet;
use serde_json::Value;
use smallvec::SmallVec;
use std::{borrow::Cow, collections::BTreeSet};

pub type Token = Cow<'static, str>;
pub type Tokens = SmallVec<[Token; 4]>;

/// Normalized value of a single directive.
///
/// `Unset`, an empty `Multi` and `Flag(false)` all mean "directive absent":
/// a policy never stores them and the serializer never renders them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DirectiveValue {
    #[default]
    Unset,
    Single(Token),
    Multi(Tokens),
    Flag(bool),
}

impl DirectiveValue {
    #[inline]
    pub fn single(token: impl Into<Token>) -> Self {
        Self::Single(token.into())
    }

    pub fn multi<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        Self::Multi(tokens.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Unset | Self::Flag(false) => true,
            Self::Multi(tokens) => tokens.is_empty(),
            Self::Single(_) | Self::Flag(true) => false,
        }
    }

    /// Tokens in render order. Flags and unset values have none.
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        match self {
            Self::Single(token) => std::slice::from_ref(token),
            Self::Multi(tokens) => tokens,
            Self::Unset | Self::Flag(_) => &[],
        }
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens().iter().any(|t| t == token)
    }

    /// Appends a token, promoting a single value to a list.
    pub fn push_token(&mut self, token: impl Into<Token>) {
        let token = token.into();
        match self {
            Self::Multi(tokens) => tokens.push(token),
            Self::Single(existing) => {
                let existing = std::mem::take(existing);
                *self = Self::Multi(smallvec::smallvec![existing, token]);
            }
            Self::Unset | Self::Flag(_) => *self = Self::Single(token),
        }
    }

    /// Space-joined tokens; empty for a flag.
    pub fn rendered(&self) -> String {
        self.tokens().join(TOKEN_SEPARATOR)
    }

    #[inline]
    pub fn estimated_size(&self) -> usize {
        let tokens = self.tokens();
        tokens.iter().map(|t| t.len()).sum::<usize>() + tokens.len()
    }

    /// Writes `name` followed by the tokens. Does nothing for unset values.
    pub(crate) fn write_directive(&self, name: &str, out: &mut String) {
        if self.is_unset() {
            return;
        }

        out.push_str(name);
        for token in self.tokens() {
            out.push_str(TOKEN_SEPARATOR);
            out.push_str(token);
        }
    }
}

/// Conversion of the supported input shapes into a [`DirectiveValue`].
///
/// Strings become a single token, booleans a flag, and lists or ordered sets
/// of strings an ordered token list. `BTreeSet` input renders sorted and
/// `IndexSet` input in insertion order. Dynamic [`serde_json::Value`] input
/// is checked at runtime by [`coerce_value`].
pub trait IntoDirectiveValue {
    fn into_directive_value(self) -> Result<DirectiveValue, CspError>;
}

impl IntoDirectiveValue for DirectiveValue {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(self)
    }
}

impl IntoDirectiveValue for bool {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::Flag(self))
    }
}

impl IntoDirectiveValue for &str {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::Single(Cow::Owned(self.to_owned())))
    }
}

impl IntoDirectiveValue for String {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::Single(Cow::Owned(self)))
    }
}

impl IntoDirectiveValue for Token {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::Single(self))
    }
}

impl IntoDirectiveValue for Source {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::Single(self.into()))
    }
}

impl<T: Into<Token>> IntoDirectiveValue for Vec<T> {
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::multi(self))
    }
}

impl<T: Into<Token>, const N: usize> IntoDirectiveValue for [T; N] {
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::multi(self))
    }
}

impl<T: Into<Token>> IntoDirectiveValue for BTreeSet<T> {
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::multi(self))
    }
}

impl<T: Into<Token>> IntoDirectiveValue for IndexSet<T> {
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        Ok(DirectiveValue::multi(self))
    }
}

impl IntoDirectiveValue for Value {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        coerce_value(&self)
    }
}

impl IntoDirectiveValue for &Value {
    #[inline]
    fn into_directive_value(self) -> Result<DirectiveValue, CspError> {
        coerce_value(self)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerces a dynamically typed value into a [`DirectiveValue`].
///
/// Anything other than a string, a boolean or an array made only of strings
/// is rejected with [`CspError::StructuralInput`].
pub fn coerce_value(value: &Value) -> Result<DirectiveValue, CspError> {
    match value {
        Value::String(token) => Ok(DirectiveValue::Single(Cow::Owned(token.clone()))),
        Value::Bool(flag) => Ok(DirectiveValue::Flag(*flag)),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(token) => Ok(Cow::Owned(token.clone())),
                other => Err(CspError::structural(format_args!(
                    "list element {} is a {}, expected a string",
                    other,
                    kind_of(other)
                ))),
            })
            .collect::<Result<Tokens, _>>()
            .map(DirectiveValue::Multi),
        other => Err(CspError::structural(format_args!(
            "{} is a {}, expected a string, a boolean or a list of strings",
            other,
            kind_of(other)
        ))),
    }
}

/// Combines a base value with an override.
///
/// Two lists concatenate, skipping override tokens the base already has so
/// that applying the same override twice is a no-op. An unset override
/// (`false`, empty list) unsets the directive. Any other override replaces
/// the base value.
pub fn merge_values(base: &DirectiveValue, over: &DirectiveValue) -> DirectiveValue {
    if over.is_unset() {
        return DirectiveValue::Unset;
    }

    match (base, over) {
        (DirectiveValue::Multi(base_tokens), DirectiveValue::Multi(over_tokens)) => {
            let mut merged = base_tokens.clone();
            for token in over_tokens {
                if !base_tokens.contains(token) {
                    merged.push(token.clone());
                }
            }
            DirectiveValue::Multi(merged)
        }
        (_, over) => over.clone(),
    }
}
