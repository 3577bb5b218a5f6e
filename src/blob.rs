//! Wire format of the encrypted blob
//!
//! The blob is a `0x`-prefixed lowercase hex string over the byte layout
//!
//! ```text
//! word 0: chunk count, big-endian
//! word 1: compressed ephemeral public key, left-padded with zeros
//! word 2: auth_key[0], big-endian
//! word 3: auth_key[1], big-endian
//! word 4..: one masked chunk per word, big-endian
//! ```
//!
//! with 32-byte words throughout. The mailbox contract stores the blob as an
//! opaque byte string; everything needed for decryption other than the secret
//! key is embedded, so parsing is strict: word-aligned body, chunk count
//! matching the declared length, canonical (below-modulus) scalar words.

use crate::encryption::Ciphertext;
use crate::error::NoteEncryptionError;
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::{string::String, vec::Vec};

pub const WORD_SIZE: usize = 32;
pub const HEADER_WORDS: usize = 4;
/// Largest chunk count the format accepts. Bounds decrypt-side allocation for
/// attacker-supplied blobs; about 31 KiB of text on the supported fields.
pub const MAX_CHUNKS: usize = 1024;
pub const HEX_PREFIX: &str = "0x";

impl<G: AffineRepr> Ciphertext<G> {
    pub fn to_bytes(&self) -> Result<Vec<u8>, NoteEncryptionError> {
        let mut out = Vec::with_capacity(WORD_SIZE * (HEADER_WORDS + self.encrypted.len()));
        out.extend_from_slice(&length_word(self.encrypted.len()));
        out.extend_from_slice(&point_to_word(&self.eph_pk)?);
        out.extend_from_slice(&scalar_to_word(&self.auth_key[0])?);
        out.extend_from_slice(&scalar_to_word(&self.auth_key[1])?);
        for chunk in &self.encrypted {
            out.extend_from_slice(&scalar_to_word(chunk)?);
        }
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NoteEncryptionError> {
        let header = WORD_SIZE * HEADER_WORDS;
        if bytes.len() < header || (bytes.len() - header) % WORD_SIZE != 0 {
            return Err(NoteEncryptionError::MalformedBlob);
        }
        let declared = length_from_word(&bytes[..WORD_SIZE])?;
        if declared == 0 || declared > MAX_CHUNKS || declared != (bytes.len() - header) / WORD_SIZE
        {
            return Err(NoteEncryptionError::MalformedBlob);
        }
        let eph_pk = point_from_word::<G>(&bytes[WORD_SIZE..2 * WORD_SIZE])?;
        let auth_key = [
            scalar_from_word(&bytes[2 * WORD_SIZE..3 * WORD_SIZE])?,
            scalar_from_word(&bytes[3 * WORD_SIZE..4 * WORD_SIZE])?,
        ];
        let mut encrypted = Vec::with_capacity(declared);
        for i in 0..declared {
            let at = header + i * WORD_SIZE;
            encrypted.push(scalar_from_word(&bytes[at..at + WORD_SIZE])?);
        }
        Ok(Self {
            eph_pk,
            auth_key,
            encrypted,
        })
    }

    pub fn to_hex(&self) -> Result<String, NoteEncryptionError> {
        let mut blob = String::from(HEX_PREFIX);
        blob.push_str(&hex::encode(self.to_bytes()?));
        Ok(blob)
    }

    pub fn from_hex(blob: &str) -> Result<Self, NoteEncryptionError> {
        let body = blob
            .strip_prefix(HEX_PREFIX)
            .ok_or(NoteEncryptionError::MalformedBlob)?;
        let bytes = hex::decode(body).map_err(|_| NoteEncryptionError::MalformedBlob)?;
        Self::from_bytes(&bytes)
    }
}

fn length_word(n: usize) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 8..].copy_from_slice(&(n as u64).to_be_bytes());
    word
}

fn length_from_word(word: &[u8]) -> Result<usize, NoteEncryptionError> {
    if word[..WORD_SIZE - 8].iter().any(|b| *b != 0) {
        return Err(NoteEncryptionError::MalformedBlob);
    }
    let mut be = [0u8; 8];
    be.copy_from_slice(&word[WORD_SIZE - 8..]);
    usize::try_from(u64::from_be_bytes(be)).map_err(|_| NoteEncryptionError::MalformedBlob)
}

fn scalar_to_word<F: PrimeField>(f: &F) -> Result<[u8; WORD_SIZE], NoteEncryptionError> {
    let be = f.into_bigint().to_bytes_be();
    let mut word = [0u8; WORD_SIZE];
    if be.len() > WORD_SIZE {
        let extra = be.len() - WORD_SIZE;
        if be[..extra].iter().any(|b| *b != 0) {
            return Err(SerializationError::NotEnoughSpace.into());
        }
        word.copy_from_slice(&be[extra..]);
    } else {
        word[WORD_SIZE - be.len()..].copy_from_slice(&be);
    }
    Ok(word)
}

fn scalar_from_word<F: PrimeField>(word: &[u8]) -> Result<F, NoteEncryptionError> {
    let f = F::from_be_bytes_mod_order(word);
    // a word at or above the modulus does not survive the reduction unchanged;
    // only canonical words are accepted
    if scalar_to_word(&f)?.as_slice() != word {
        return Err(NoteEncryptionError::MalformedBlob);
    }
    Ok(f)
}

fn point_to_word<G: AffineRepr>(point: &G) -> Result<[u8; WORD_SIZE], NoteEncryptionError> {
    let mut compressed = Vec::with_capacity(point.compressed_size());
    point.serialize_compressed(&mut compressed)?;
    if compressed.len() > WORD_SIZE {
        return Err(SerializationError::NotEnoughSpace.into());
    }
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - compressed.len()..].copy_from_slice(&compressed);
    Ok(word)
}

fn point_from_word<G: AffineRepr>(word: &[u8]) -> Result<G, NoteEncryptionError> {
    let n = G::generator().compressed_size();
    if n > WORD_SIZE {
        return Err(SerializationError::NotEnoughSpace.into());
    }
    let pad = WORD_SIZE - n;
    if word[..pad].iter().any(|b| *b != 0) {
        return Err(NoteEncryptionError::MalformedBlob);
    }
    G::deserialize_compressed(&word[pad..]).map_err(|_| NoteEncryptionError::MalformedBlob)
}
