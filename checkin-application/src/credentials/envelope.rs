use checkin_domain::ParticipantData;
use hmac::Mac;
use serde::{Deserialize, Serialize};

use super::{hmac_sha256_hex, is_lower_hex, keyed_mac, CredentialError, PARTICIPANT_ID_HEX_LEN};

/// Hex length of an HMAC-SHA256 signature.
pub const SIGNATURE_HEX_LEN: usize = 64;

/// Wire form of a badge: `data` is the participant JSON exactly as signed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SignedEnvelope {
    data: String,
    signature: String,
}

/// Builds the string stored as `qr_code_data` and printed into the badge.
pub fn sign_participant(
    payload: &ParticipantData,
    secret_key: &str,
) -> Result<String, CredentialError> {
    let data = serde_json::to_string(payload)
        .map_err(|err| CredentialError::Encoding(err.to_string()))?;
    let signature = hmac_sha256_hex(secret_key, data.as_bytes())?;
    serde_json::to_string(&SignedEnvelope { data, signature })
        .map_err(|err| CredentialError::Encoding(err.to_string()))
}

/// Checks a decoded badge against the event key and returns its payload.
///
/// Nothing inside `data` is looked at before the MAC has been checked.
/// The comparison runs in constant time.
pub fn verify_participant(
    envelope: &str,
    secret_key: &str,
) -> Result<ParticipantData, CredentialError> {
    let envelope: SignedEnvelope =
        serde_json::from_str(envelope).map_err(|_| CredentialError::MalformedEnvelope)?;
    if !is_lower_hex(&envelope.signature, SIGNATURE_HEX_LEN) {
        return Err(CredentialError::MalformedEnvelope);
    }
    let signature =
        hex::decode(&envelope.signature).map_err(|_| CredentialError::MalformedEnvelope)?;

    let mut mac = keyed_mac(secret_key)?;
    mac.update(envelope.data.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| CredentialError::SignatureMismatch)?;

    let payload: ParticipantData =
        serde_json::from_str(&envelope.data).map_err(|_| CredentialError::MalformedPayload)?;
    if !is_lower_hex(&payload.id, PARTICIPANT_ID_HEX_LEN) {
        return Err(CredentialError::MalformedPayload);
    }
    Ok(payload)
}
