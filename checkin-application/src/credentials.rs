// Badge credentials: per-event keys, participant identity and signed envelopes.
//
// Every MAC in this module is HMAC-SHA256 keyed with the UTF-8 bytes of the
// event's hex secret string, so badges printed by earlier releases keep verifying.

pub mod envelope;
pub mod identity;
pub mod keying;

pub use envelope::{sign_participant, verify_participant, SIGNATURE_HEX_LEN};
pub use identity::{derive_participant_id, PARTICIPANT_ID_HEX_LEN};
pub use keying::{generate_secret_key, SECRET_KEY_BYTES};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("event secret key is empty")]
    EmptyKey,
    #[error("hmac init failed")]
    KeyInit,
    #[error("malformed envelope")]
    MalformedEnvelope,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("malformed participant payload")]
    MalformedPayload,
    #[error("payload encoding failed: {0}")]
    Encoding(String),
}

fn keyed_mac(secret_key: &str) -> Result<HmacSha256, CredentialError> {
    if secret_key.is_empty() {
        return Err(CredentialError::EmptyKey);
    }
    HmacSha256::new_from_slice(secret_key.as_bytes()).map_err(|_| CredentialError::KeyInit)
}

fn hmac_sha256_hex(secret_key: &str, message: &[u8]) -> Result<String, CredentialError> {
    let mut mac = keyed_mac(secret_key)?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn is_lower_hex(value: &str, len: usize) -> bool {
    value.len() == len
        && value
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch))
}
