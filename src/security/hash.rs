use crate::constants::{HASH_PREFIX_SHA256, HASH_PREFIX_SHA384, HASH_PREFIX_SHA512, SUFFIX_QUOTE};
use crate::core::source::Source;
use crate::error::CspError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ring::digest::{self, SHA256, SHA384, SHA512};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    #[inline(always)]
    pub fn digest_algorithm(&self) -> &'static digest::Algorithm {
        match self {
            HashAlgorithm::Sha256 => &SHA256,
            HashAlgorithm::Sha384 => &SHA384,
            HashAlgorithm::Sha512 => &SHA512,
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    #[inline(always)]
    pub const fn prefix(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => HASH_PREFIX_SHA256,
            HashAlgorithm::Sha384 => HASH_PREFIX_SHA384,
            HashAlgorithm::Sha512 => HASH_PREFIX_SHA512,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for HashAlgorithm {
    type Error = CspError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(CspError::InvalidHashAlgorithm(s.to_string())),
        }
    }
}

/// Digests inline script or style content into CSP hash sources.
#[derive(Debug)]
pub struct HashGenerator;

impl HashGenerator {
    /// Base64 digest of `data`, without the `'sha256-…'` wrapping.
    #[inline]
    pub fn generate(algorithm: HashAlgorithm, data: &[u8]) -> String {
        let digest = digest::digest(algorithm.digest_algorithm(), data);
        BASE64.encode(digest.as_ref())
    }

    #[inline]
    pub fn generate_source(algorithm: HashAlgorithm, data: &[u8]) -> Source {
        Source::Hash {
            algorithm,
            value: Self::generate(algorithm, data).into(),
        }
    }

    /// Ready-to-use directive token, e.g. `'sha256-…'`.
    pub fn generate_token(algorithm: HashAlgorithm, data: &[u8]) -> String {
        let hash = Self::generate(algorithm, data);
        let mut token =
            String::with_capacity(algorithm.prefix().len() + hash.len() + SUFFIX_QUOTE.len());
        token.push_str(algorithm.prefix());
        token.push_str(&hash);
        token.push_str(SUFFIX_QUOTE);
        token
    }
}
