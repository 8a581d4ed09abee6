use crate::constants::KNOWN_DIRECTIVES;
use rustc_hash::FxHashSet;
use std::{borrow::Cow, sync::OnceLock};

static KNOWN_DIRECTIVE_SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();

fn known_directive_set() -> &'static FxHashSet<&'static str> {
    KNOWN_DIRECTIVE_SET.get_or_init(|| KNOWN_DIRECTIVES.iter().copied().collect())
}

/// Turns an identifier-style key (`script_src`, `Script_Src`) into the
/// lowercase hyphenated directive form (`script-src`). Input already in that
/// form is returned unchanged.
#[inline]
pub fn to_directive_name(key: &str) -> Cow<'_, str> {
    if key.bytes().any(|b| b == b'_' || b.is_ascii_uppercase()) {
        Cow::Owned(
            key.chars()
                .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
                .collect(),
        )
    } else {
        Cow::Borrowed(key)
    }
}

/// Returns the interned name if `name` (already hyphenated) is a known directive.
#[inline]
pub fn known_directive(name: &str) -> Option<&'static str> {
    known_directive_set().get(name).copied()
}

#[inline]
pub fn is_known_directive(key: &str) -> bool {
    known_directive(&to_directive_name(key)).is_some()
}

/// Resolves `key` against the known directive table.
///
/// Known directives come back in canonical form. Anything else resolves to
/// `fallback`, or to the hyphenated key when no fallback is given.
pub fn resolve_directive<'a>(key: &'a str, fallback: Option<&'a str>) -> Cow<'a, str> {
    let name = to_directive_name(key);
    if let Some(known) = known_directive(&name) {
        return Cow::Borrowed(known);
    }

    match fallback {
        Some(fallback) => Cow::Borrowed(fallback),
        None => name,
    }
}

/// Canonical storage key: interned for known directives, owned otherwise.
pub(crate) fn canonical_key(key: &str) -> Cow<'static, str> {
    let name = to_directive_name(key);
    match known_directive(&name) {
        Some(known) => Cow::Borrowed(known),
        None => Cow::Owned(name.into_owned()),
    }
}
