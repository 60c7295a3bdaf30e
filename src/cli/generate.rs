//! Random password generation for `lockbox generate`.

use rand::seq::SliceRandom;
use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::{LockboxError, Result};

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!#$%&()*+,-./:;<=>?@[]^_{|}~";

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 1024;

/// Generate a random password of `length` characters.
///
/// The result always contains at least one character from every
/// enabled class (lowercase, uppercase, digits, and symbols if asked).
pub fn generate_password(length: usize, symbols: bool) -> Result<Zeroizing<String>> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(LockboxError::CommandFailed(format!(
            "password length must be between {MIN_LENGTH} and {MAX_LENGTH} (got {length})"
        )));
    }

    let mut classes: Vec<&[u8]> = vec![LOWER, UPPER, DIGITS];
    if symbols {
        classes.push(SYMBOLS);
    }
    let alphabet: Vec<u8> = classes.iter().flat_map(|c| c.iter().copied()).collect();

    let mut rng = rand::rng();
    let mut chars = Zeroizing::new(Vec::with_capacity(length));

    for class in &classes {
        chars.push(class[rng.random_range(0..class.len())]);
    }
    while chars.len() < length {
        chars.push(alphabet[rng.random_range(0..alphabet.len())]);
    }
    chars.shuffle(&mut rng);

    let password: String = chars.iter().map(|&b| char::from(b)).collect();
    Ok(Zeroizing::new(password))
}
