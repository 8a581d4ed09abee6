use crate::constants::{DEFAULT_NONCE_LENGTH, NONCE_PREFIX, SUFFIX_QUOTE};
use crate::core::source::Source;
use crate::error::CspError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine};
use getrandom::getrandom;
use smallvec::SmallVec;

/// Random nonce supplier. `length` is the number of random bytes before
/// base64 encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonceGenerator {
    length: usize,
}

impl NonceGenerator {
    /// A zero `length` falls back to [`DEFAULT_NONCE_LENGTH`].
    pub fn new(length: usize) -> Self {
        if length == 0 {
            log::warn!(
                "Nonce length 0 would yield an empty nonce; using {} bytes",
                DEFAULT_NONCE_LENGTH
            );
            return Self::default();
        }
        Self { length }
    }

    pub fn generate(&self) -> Result<String, CspError> {
        let mut buffer: SmallVec<[u8; 32]> = SmallVec::from_elem(0, self.length);
        getrandom(&mut buffer).map_err(|e| CspError::CryptoError(e.to_string()))?;
        Ok(BASE64.encode(&buffer))
    }

    #[inline]
    pub fn generate_source(&self) -> Result<Source, CspError> {
        Ok(Source::Nonce(self.generate()?.into()))
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_NONCE_LENGTH,
        }
    }
}

/// Wraps a raw nonce as a directive token: `'nonce-<value>'`.
pub fn nonce_token(nonce: &str) -> String {
    let mut token = String::with_capacity(NONCE_PREFIX.len() + nonce.len() + SUFFIX_QUOTE.len());
    token.push_str(NONCE_PREFIX);
    token.push_str(nonce);
    token.push_str(SUFFIX_QUOTE);
    token
}
