//! Hashing to the scalar field

use ark_ff::PrimeField;
use ark_std::vec::Vec;
use digest::Digest;

/// Hash bytes to a field element by try-and-increment. Variable time, which is
/// fine for the uses in this crate: the input always contains a fresh per-call
/// shared secret and the loop terminates on the first attempt with overwhelming
/// probability.
pub fn field_elem_from_try_and_incr<F: PrimeField, D: Digest>(bytes: &[u8]) -> F {
    let mut hash = D::digest(bytes);
    let mut f = F::from_random_bytes(&hash);
    let mut j = 1u64;
    while f.is_none() {
        let mut attempt = Vec::with_capacity(bytes.len() + 17);
        attempt.extend_from_slice(bytes);
        attempt.extend_from_slice(b"-attempt-");
        attempt.extend_from_slice(&j.to_be_bytes());
        hash = D::digest(&attempt);
        f = F::from_random_bytes(&hash);
        j += 1;
    }
    f.unwrap()
}
