//! Hashed Elgamal encryption of an encoded note
//!
//! One shared secret is created per note using Diffie-Hellman key exchange with a
//! fresh ephemeral scalar:
//! 1. Sender draws a random non-zero `nonce` and computes the ephemeral key
//!    `nonce * generator` and the shared secret `nonce * public_key`.
//! 2. Each chunk of the encoded note is masked by adding a one time pad derived by
//!    hashing the shared secret with a per-index counter.
//! 3. Two further derived field elements form the authentication key, embedded in
//!    the ciphertext so the recipient can tell a wrong secret key from a garbled
//!    but well-formed decryption.
//!
//! The recipient recomputes the same shared secret as `secret_key * ephemeral_key`
//! and subtracts the pads. A mismatched authentication key fails with
//! [`NoteEncryptionError::AuthenticationFailed`]; decryption never silently
//! returns plaintext under the wrong key.

use crate::codec;
use crate::error::NoteEncryptionError;
use crate::hashing::field_elem_from_try_and_incr;
use crate::serde_utils::ArkObjectBytes;
use crate::setup::{PublicKey, SecretKey};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_into_iter, rand::RngCore, string::String, vec::Vec, UniformRand, Zero};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use crate::blob::MAX_CHUNKS;

const MASK_LABEL: &[u8] = b"chunk-mask";
const AUTH_LABEL: &[u8] = b"auth-key";

/// Encryption of one note. `eph_pk` is the per-note nonce point `nonce * generator`,
/// `encrypted` holds one masked field element per chunk of the encoded note.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct Ciphertext<G: AffineRepr> {
    #[serde_as(as = "ArkObjectBytes")]
    pub eph_pk: G,
    #[serde_as(as = "[ArkObjectBytes; 2]")]
    pub auth_key: [G::ScalarField; 2],
    #[serde_as(as = "Vec<ArkObjectBytes>")]
    pub encrypted: Vec<G::ScalarField>,
}

impl<G: AffineRepr> Ciphertext<G> {
    /// Encrypt `text` for `public_key`. Probabilistic: repeated calls on the same
    /// inputs yield different ciphertexts, all decrypting to `text`.
    pub fn new<R: RngCore, D: Digest>(
        rng: &mut R,
        text: &str,
        public_key: &PublicKey<G>,
    ) -> Result<Self, NoteEncryptionError> {
        let note = codec::encode::<G::ScalarField>(text)?;
        if note.used_len() > MAX_CHUNKS {
            return Err(NoteEncryptionError::MessageTooLarge(
                note.used_len(),
                MAX_CHUNKS,
            ));
        }
        if public_key.0.is_zero() {
            return Err(NoteEncryptionError::InvalidPublicKey);
        }
        // a zero nonce would make the shared secret independent of the recipient key
        let mut nonce = G::ScalarField::rand(rng);
        while nonce.is_zero() {
            nonce = G::ScalarField::rand(rng);
        }
        let nonce_repr = nonce.into_bigint();
        let eph_pk = G::generator().mul_bigint(nonce_repr).into_affine();
        let shared_secret = compressed_bytes(&public_key.0.mul_bigint(nonce_repr).into_affine())?;
        let chunks = note.chunks;
        let encrypted = cfg_into_iter!(0..chunks.len())
            .map(|i| chunks[i] + one_time_pad::<G::ScalarField, D>(&shared_secret, MASK_LABEL, i))
            .collect();
        Ok(Self {
            eph_pk,
            auth_key: derive_auth_key::<G::ScalarField, D>(&shared_secret),
            encrypted,
        })
    }

    /// Decrypt the note. The shared secret is recomputed as
    /// `secret_key * eph_pk == nonce * public_key`.
    pub fn decrypt<D: Digest>(
        &self,
        secret_key: &SecretKey<G::ScalarField>,
    ) -> Result<String, NoteEncryptionError> {
        let shared_secret =
            compressed_bytes(&self.eph_pk.mul_bigint(secret_key.0.into_bigint()).into_affine())?;
        if derive_auth_key::<G::ScalarField, D>(&shared_secret) != self.auth_key {
            return Err(NoteEncryptionError::AuthenticationFailed);
        }
        let chunks = cfg_into_iter!(0..self.encrypted.len())
            .map(|i| {
                self.encrypted[i]
                    - one_time_pad::<G::ScalarField, D>(&shared_secret, MASK_LABEL, i)
            })
            .collect::<Vec<_>>();
        codec::decode(&chunks)
    }
}

/// Encrypt `text` for `public_key` and serialize to the hex blob consumed by the
/// mailbox contract
pub fn encrypt<R: RngCore, D: Digest, G: AffineRepr>(
    rng: &mut R,
    public_key: &PublicKey<G>,
    text: &str,
) -> Result<String, NoteEncryptionError> {
    Ciphertext::<G>::new::<_, D>(rng, text, public_key)?.to_hex()
}

/// Parse a hex blob and decrypt it with `secret_key`
pub fn decrypt<D: Digest, G: AffineRepr>(
    secret_key: &SecretKey<G::ScalarField>,
    blob: &str,
) -> Result<String, NoteEncryptionError> {
    Ciphertext::<G>::from_hex(blob)?.decrypt::<D>(secret_key)
}

fn one_time_pad<F: PrimeField, D: Digest>(shared_secret: &[u8], label: &[u8], index: usize) -> F {
    let mut input = Vec::with_capacity(shared_secret.len() + label.len() + 4);
    input.extend_from_slice(shared_secret);
    input.extend_from_slice(label);
    input.extend_from_slice(&(index as u32).to_be_bytes());
    field_elem_from_try_and_incr::<F, D>(&input)
}

fn derive_auth_key<F: PrimeField, D: Digest>(shared_secret: &[u8]) -> [F; 2] {
    [
        one_time_pad::<F, D>(shared_secret, AUTH_LABEL, 0),
        one_time_pad::<F, D>(shared_secret, AUTH_LABEL, 1),
    ]
}

fn compressed_bytes<T: CanonicalSerialize>(t: &T) -> Result<Vec<u8>, NoteEncryptionError> {
    let mut bytes = Vec::with_capacity(t.compressed_size());
    t.serialize_compressed(&mut bytes)?;
    Ok(bytes)
}
