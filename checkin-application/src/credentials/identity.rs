use checkin_domain::normalize_email;

use super::{hmac_sha256_hex, CredentialError};

/// Length of a participant id: the first 128 bits of the MAC, in hex.
pub const PARTICIPANT_ID_HEX_LEN: usize = 32;

/// Stable participant id within one event.
///
/// The canonical message is `email|first|last` with the email trimmed and
/// lower-cased and both names trimmed. Pipes inside fields are not escaped.
pub fn derive_participant_id(
    first_name: &str,
    last_name: &str,
    email: &str,
    event_secret_key: &str,
) -> Result<String, CredentialError> {
    let canonical = format!(
        "{}|{}|{}",
        normalize_email(email),
        first_name.trim(),
        last_name.trim()
    );
    let mut id = hmac_sha256_hex(event_secret_key, canonical.as_bytes())?;
    id.truncate(PARTICIPANT_ID_HEX_LEN);
    Ok(id)
}
