use rand::rngs::OsRng;
use rand::RngCore;

pub const SECRET_KEY_BYTES: usize = 32;

/// Fresh 256-bit event key, lowercase hex. Panics only if the OS entropy
/// source is unavailable.
pub fn generate_secret_key() -> String {
    let mut bytes = [0u8; SECRET_KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
