//! Salted password hashing in the `pbkdf2:sha256:ROUNDS$SALT$HASH` format.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

pub const DEFAULT_ROUNDS: u32 = 600_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const SCHEME: &str = "pbkdf2:sha256";

pub fn hash_password(password: &str, rounds: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let hash = derive(password, &salt, rounds);
    format!("{SCHEME}:{rounds}${}${}", hex::encode(salt), hex::encode(hash))
}

/// Returns false for malformed stored values instead of erroring.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let Some((method, rest)) = stored.split_once('$') else {
        return false;
    };
    let Some(rounds) = method
        .strip_prefix(SCHEME)
        .and_then(|r| r.strip_prefix(':'))
        .and_then(|r| r.parse::<u32>().ok())
    else {
        return false;
    };
    let Some((salt_hex, hash_hex)) = rest.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(hash_hex)) else {
        return false;
    };
    if expected.len() != HASH_LEN {
        return false;
    }
    let actual = derive(password, &salt, rounds);
    actual
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn derive(password: &str, salt: &[u8], rounds: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut out);
    out
}
