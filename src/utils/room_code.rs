//! Short room codes for shared sessions.

use rand::Rng;

pub const ROOM_CODE_LEN: usize = 5;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base-36 code of `ROOM_CODE_LEN` characters.
pub fn random_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

pub fn is_room_code(text: &str) -> bool {
    text.len() == ROOM_CODE_LEN
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn codes_are_five_base36_chars() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let code = random_room_code(&mut rng);
            assert!(is_room_code(&code), "{code}");
        }
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(!is_room_code("ABCDE"));
        assert!(!is_room_code("abcd"));
        assert!(!is_room_code("ab-de"));
    }
}
