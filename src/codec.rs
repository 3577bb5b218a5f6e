//! Reversible mapping between printable text and field elements
//!
//! A note is packed as the byte stream `text || 0x00 || zero padding`, split into
//! windows of [`chunk_capacity`] bytes, each window becoming one field element
//! (big-endian, first character most significant). Characters are restricted to
//! the printable bytes `32..=122` so the zero byte can only ever be the
//! terminator, which makes [`decode`] self-terminating: no length needs to travel
//! with the chunks.

use crate::error::NoteEncryptionError;
use ark_ff::{BigInteger, PrimeField};
use ark_std::{string::String, vec::Vec};

/// Lowest allowed character byte (space)
pub const CHAR_LOW: u8 = 32;
/// Highest allowed character byte ('z')
pub const CHAR_HIGH: u8 = 122;

/// Number of characters carried by one chunk. Chosen so the packed value of a
/// full window is strictly below the field modulus.
pub fn chunk_capacity<F: PrimeField>() -> usize {
    ((F::MODULUS_BIT_SIZE - 1) / 8) as usize
}

/// A note encoded as an ordered sequence of field elements. Always holds at
/// least one chunk; the empty note encodes as a single zero-valued chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedNote<F: PrimeField> {
    pub chunks: Vec<F>,
}

impl<F: PrimeField> EncodedNote<F> {
    /// Number of chunks the note occupies, always >= 1
    pub fn used_len(&self) -> usize {
        self.chunks.len()
    }
}

/// Encode text as field elements. Pure and deterministic. Fails with
/// [`NoteEncryptionError::InvalidCharacter`] on any byte outside
/// `CHAR_LOW..=CHAR_HIGH`.
pub fn encode<F: PrimeField>(text: &str) -> Result<EncodedNote<F>, NoteEncryptionError> {
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b < CHAR_LOW || *b > CHAR_HIGH {
            return Err(NoteEncryptionError::InvalidCharacter(*b, i));
        }
    }
    let cap = chunk_capacity::<F>();
    let mut stream = Vec::with_capacity(bytes.len() + cap);
    stream.extend_from_slice(bytes);
    stream.push(0);
    while stream.len() % cap != 0 {
        stream.push(0);
    }
    let chunks = stream
        .chunks(cap)
        .map(F::from_be_bytes_mod_order)
        .collect();
    Ok(EncodedNote { chunks })
}

/// Decode chunks back to text, stopping at the first zero byte. Chunks and
/// bytes after the terminator are ignored. Fails with
/// [`NoteEncryptionError::MalformedEncoding`] if a chunk's value does not fit
/// its window or a byte before the terminator is outside the printable range.
pub fn decode<F: PrimeField>(chunks: &[F]) -> Result<String, NoteEncryptionError> {
    let cap = chunk_capacity::<F>();
    let mut text = Vec::new();
    for chunk in chunks {
        let be = chunk.into_bigint().to_bytes_be();
        let start = be.len().saturating_sub(cap);
        // the window occupies the low-order `cap` bytes of the element
        if be[..start].iter().any(|b| *b != 0) {
            return Err(NoteEncryptionError::MalformedEncoding);
        }
        for b in &be[start..] {
            if *b == 0 {
                return String::from_utf8(text)
                    .map_err(|_| NoteEncryptionError::MalformedEncoding);
            }
            if *b < CHAR_LOW || *b > CHAR_HIGH {
                return Err(NoteEncryptionError::MalformedEncoding);
            }
            text.push(*b);
        }
    }
    String::from_utf8(text).map_err(|_| NoteEncryptionError::MalformedEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ed25519::Fr as Ed25519Fr;
    use ark_ed_on_bn254::Fr;
    use ark_ff::Zero;
    use ark_std::vec;

    fn assert_round_trip<F: PrimeField>(text: &str) {
        let encoded = encode::<F>(text).unwrap();
        assert!(encoded.used_len() >= 1);
        assert_eq!(decode(&encoded.chunks).unwrap(), text);
    }

    #[test]
    fn round_trip() {
        for text in [
            "",
            "H",
            "Hello",
            "The quick brown fox jumps over the lazy dog",
            "space and symbols !\"#$%&'()*+,-./:;<=>?@[\\]^_`",
        ] {
            assert_round_trip::<Fr>(text);
            assert_round_trip::<Ed25519Fr>(text);
        }
        // every allowed character once
        let all: String = (CHAR_LOW..=CHAR_HIGH).map(char::from).collect();
        assert_round_trip::<Fr>(&all);
    }

    #[test]
    fn empty_note_is_one_zero_chunk() {
        let encoded = encode::<Fr>("").unwrap();
        assert_eq!(encoded.used_len(), 1);
        assert!(encoded.chunks[0].is_zero());
    }

    #[test]
    fn terminator_rolls_into_extra_chunk_on_exact_fill() {
        let cap = chunk_capacity::<Fr>();
        let text = "a".repeat(cap);
        let encoded = encode::<Fr>(&text).unwrap();
        assert_eq!(encoded.used_len(), 2);
        assert!(encoded.chunks[1].is_zero());
        assert_eq!(decode(&encoded.chunks).unwrap(), text);

        let shorter = "a".repeat(cap - 1);
        assert_eq!(encode::<Fr>(&shorter).unwrap().used_len(), 1);
    }

    #[test]
    fn multi_chunk_round_trip() {
        let cap = chunk_capacity::<Fr>();
        let text = "a".repeat(2000);
        let encoded = encode::<Fr>(&text).unwrap();
        assert_eq!(encoded.used_len(), (2000 + 1 + cap - 1) / cap);
        assert_eq!(decode(&encoded.chunks).unwrap(), text);
    }

    #[test]
    fn rejects_out_of_range_characters() {
        assert!(matches!(
            encode::<Fr>("new\nline"),
            Err(NoteEncryptionError::InvalidCharacter(10, 3))
        ));
        // '{' is one past the highest allowed byte
        assert!(matches!(
            encode::<Fr>("z{"),
            Err(NoteEncryptionError::InvalidCharacter(123, 1))
        ));
        // multi-byte characters are out of range as well
        assert!(matches!(
            encode::<Fr>("héllo"),
            Err(NoteEncryptionError::InvalidCharacter(_, 1))
        ));
    }

    #[test]
    fn chunks_after_terminator_are_ignored() {
        let mut chunks = encode::<Fr>("Hi").unwrap().chunks;
        chunks.push(Fr::from(12345u64));
        assert_eq!(decode(&chunks).unwrap(), "Hi");
    }

    #[test]
    fn rejects_chunk_overflowing_its_window() {
        // p - 1 occupies more bytes than a window may hold
        let chunks = vec![-Fr::from(1u64)];
        assert!(matches!(
            decode(&chunks),
            Err(NoteEncryptionError::MalformedEncoding)
        ));
    }

    #[test]
    fn rejects_out_of_range_byte_before_terminator() {
        let cap = chunk_capacity::<Fr>();
        let mut window = vec![0u8; cap];
        window[0] = 1;
        let chunks = vec![Fr::from_be_bytes_mod_order(&window)];
        assert!(matches!(
            decode(&chunks),
            Err(NoteEncryptionError::MalformedEncoding)
        ));
    }
}
