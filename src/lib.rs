#![cfg_attr(not(feature = "std"), no_std)]

//! # Encrypted notes for an on-chain mailbox
//!
//! Short text notes, encrypted for a recipient public key and serialized as an
//! opaque hex blob that a mailbox contract stores and re-emits without ever
//! seeing plaintext.
//!
//! A note travels through two layers:
//! 1. [`codec`] packs printable text (bytes 32-122) into field elements, 31
//!    characters per element on the ~32-byte fields the crate targets, with a
//!    zero terminator byte so decoding needs no external length.
//! 2. [`encryption`] masks the elements with a one time pad derived from an
//!    Elgamal-style shared secret: a fresh random scalar `r` gives the
//!    ephemeral key `r * generator` (embedded in the blob) and the shared
//!    secret `r * public_key`, which the recipient recomputes as
//!    `secret_key * ephemeral_key`. Two extra derived elements form an
//!    authentication key so decryption with the wrong secret key fails with
//!    [`error::NoteEncryptionError::AuthenticationFailed`] instead of
//!    returning garbage.
//!
//! [`blob`] defines the wire layout: four 32-byte header words (chunk count,
//! ephemeral key, authentication key pair) followed by one word per masked
//! chunk, rendered as a `0x`-prefixed hex string.
//!
//! Curve and field arithmetic comes from `arkworks`; any curve whose
//! compressed points and scalars fit a 32-byte word works, e.g. Baby Jubjub
//! (`ark-ed-on-bn254`) or Ed25519.

pub mod error;

pub mod blob;
pub mod codec;
pub mod encryption;
pub mod hashing;
pub mod serde_utils;
pub mod setup;

pub use crate::{
    encryption::{decrypt, encrypt, Ciphertext},
    setup::{keygen, PublicKey, SecretKey},
};
