//! Recipient keys

use crate::error::NoteEncryptionError;
use crate::serde_utils::ArkObjectBytes;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, vec::Vec, UniformRand};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(
    Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop, CanonicalSerialize, CanonicalDeserialize,
)]
pub struct SecretKey<F: PrimeField>(pub F);

/// Recipient public key `secret_key * generator`
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct PublicKey<G: AffineRepr>(#[serde_as(as = "ArkObjectBytes")] pub G);

impl<F: PrimeField> SecretKey<F> {
    pub fn new<R: RngCore>(rng: &mut R) -> Self {
        Self(F::rand(rng))
    }
}

impl<G: AffineRepr> PublicKey<G> {
    pub fn new(secret_key: &SecretKey<G::ScalarField>) -> Self {
        Self(
            G::generator()
                .mul_bigint(secret_key.0.into_bigint())
                .into_affine(),
        )
    }

    /// Parse a compressed curve point, rejecting off-curve, non-canonical and
    /// identity encodings
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NoteEncryptionError> {
        let point =
            G::deserialize_compressed(bytes).map_err(|_| NoteEncryptionError::InvalidPublicKey)?;
        if point.is_zero() {
            return Err(NoteEncryptionError::InvalidPublicKey);
        }
        Ok(Self(point))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, NoteEncryptionError> {
        let mut bytes = Vec::with_capacity(self.0.compressed_size());
        self.0.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }
}

pub fn keygen<R: RngCore, G: AffineRepr>(
    rng: &mut R,
) -> (SecretKey<G::ScalarField>, PublicKey<G>) {
    let sk = SecretKey::new(rng);
    let pk = PublicKey::new(&sk);
    (sk, pk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ed25519::EdwardsAffine as Ed25519Affine;
    use ark_ed_on_bn254::EdwardsAffine;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn public_key_matches_secret_key() {
        let mut rng = StdRng::seed_from_u64(0u64);

        fn check<G: AffineRepr>(rng: &mut StdRng) {
            let (sk, pk) = keygen::<_, G>(rng);
            assert_eq!(
                pk.0,
                G::generator().mul_bigint(sk.0.into_bigint()).into_affine()
            );

            let bytes = pk.to_bytes().unwrap();
            assert_eq!(PublicKey::<G>::from_bytes(&bytes).unwrap(), pk);
        }

        check::<EdwardsAffine>(&mut rng);
        check::<Ed25519Affine>(&mut rng);
    }

    #[test]
    fn rejects_bad_public_key_encodings() {
        assert!(matches!(
            PublicKey::<EdwardsAffine>::from_bytes(&[0xab; 7]),
            Err(NoteEncryptionError::InvalidPublicKey)
        ));

        let mut identity = Vec::new();
        EdwardsAffine::zero().serialize_compressed(&mut identity).unwrap();
        assert!(matches!(
            PublicKey::<EdwardsAffine>::from_bytes(&identity),
            Err(NoteEncryptionError::InvalidPublicKey)
        ));
    }
}
