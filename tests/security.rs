use csp_policy::security::{nonce_token, HashAlgorithm, HashGenerator, NonceGenerator};
use csp_policy::{CspError, CspPolicy, Source};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_generation_uniqueness() {
        let generator = NonceGenerator::new(16);

        let nonce1 = generator.generate().unwrap();
        let nonce2 = generator.generate().unwrap();

        assert_ne!(nonce1, nonce2);
    }

    #[test]
    fn test_nonce_generation_length() {
        let generator = NonceGenerator::default();

        assert_eq!(generator.length(), 16);
        assert_eq!(generator.generate().unwrap().len(), 22);
    }

    #[test]
    fn test_zero_nonce_length_uses_default() {
        let generator = NonceGenerator::new(0);

        assert_eq!(generator.length(), 16);
        assert_eq!(generator.generate().unwrap().len(), 22);
    }

    #[test]
    fn test_nonce_is_url_safe() {
        let nonce = NonceGenerator::new(32).generate().unwrap();

        assert!(nonce
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_nonce_source_renders_token() {
        let source = NonceGenerator::new(8).generate_source().unwrap();
        let nonce = source.nonce().unwrap().to_string();

        assert_eq!(source.to_string(), nonce_token(&nonce));
        assert_eq!(nonce_token("abc"), "'nonce-abc'");
    }

    #[test]
    fn test_hash_algorithm_names() {
        assert_eq!(HashAlgorithm::Sha256.to_string(), "sha256");
        assert_eq!(HashAlgorithm::Sha384.prefix(), "'sha384-");
        assert_eq!(HashAlgorithm::try_from("sha512").unwrap(), HashAlgorithm::Sha512);
        assert!(matches!(
            HashAlgorithm::try_from("md5"),
            Err(CspError::InvalidHashAlgorithm(_))
        ));
    }

    #[test]
    fn test_hash_generation_known_vector() {
        assert_eq!(
            HashGenerator::generate(HashAlgorithm::Sha256, b"abc"),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
        assert_eq!(
            HashGenerator::generate_token(HashAlgorithm::Sha256, b"abc"),
            "'sha256-ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0='"
        );
    }

    #[test]
    fn test_hash_source_in_policy() {
        let source = HashGenerator::generate_source(HashAlgorithm::Sha256, b"abc");
        let mut policy = CspPolicy::new();
        policy.set("script-src", [Source::Self_, source]).unwrap();

        assert_eq!(
            policy.header_value(),
            "script-src 'self' 'sha256-ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0='"
        );
    }
}
