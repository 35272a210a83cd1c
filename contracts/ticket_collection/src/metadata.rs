use soroban_sdk::{Env, String};

use crate::storage::{MAX_URI_LEN, TOKEN_ID_DIGITS};

/// `prefix` followed by the decimal form of `token_id`.
///
/// The prefix length is bounded at initialization so the buffer always fits.
pub fn prefixed_uri(env: &Env, prefix: &String, token_id: u64) -> String {
    let prefix_len = prefix.len() as usize;
    let mut buf = [0u8; MAX_URI_LEN];
    prefix.copy_into_slice(&mut buf[..prefix_len]);

    let mut digits = [0u8; TOKEN_ID_DIGITS];
    let mut start = TOKEN_ID_DIGITS;
    let mut rest = token_id;
    loop {
        start -= 1;
        digits[start] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    let id_len = TOKEN_ID_DIGITS - start;
    buf[prefix_len..prefix_len + id_len].copy_from_slice(&digits[start..]);
    String::from_bytes(env, &buf[..prefix_len + id_len])
}
