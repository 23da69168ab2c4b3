//! SHA-1 parameter signatures for the hosted media service.
//!
//! The service signs API calls by sorting the signed parameters by name,
//! joining them as `k1=v1&k2=v2`, appending the API secret and taking the
//! hex SHA-1 digest of the result.

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};

/// Hex-encoded SHA-1 digest of `input`.
pub fn sha1_hex(input: &str) -> String {
    hex::encode(Sha1::digest(input.as_bytes()))
}

/// Sign `params` with `secret`.
///
/// Parameter order does not matter; they are sorted by name first.
pub fn sign_params(params: &[(&str, &str)], secret: &SecretString) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    sha1_hex(&format!("{joined}{}", secret.expose_secret()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::new("secret".to_owned())
    }

    #[test]
    fn upload_signature_vector() {
        assert_eq!(
            sign_params(&[("timestamp", "1700000000")], &secret()),
            "84af3c6077e429a8e7ff26d2ca13d5feb6bc7cb0"
        );
    }

    #[test]
    fn destroy_signature_sorts_parameters() {
        let expected = "69729bdb6603eb987ff18e4af9855d2b15ef2dcd";
        assert_eq!(
            sign_params(&[("public_id", "sample"), ("timestamp", "1700000000")], &secret()),
            expected
        );
        assert_eq!(
            sign_params(&[("timestamp", "1700000000"), ("public_id", "sample")], &secret()),
            expected
        );
    }

    #[test]
    fn sha1_hex_length() {
        let digest = sha1_hex("anything");
        assert_eq!(digest.len(), 40);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
