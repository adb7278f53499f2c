//! ECDSA tests over the public API.

use proptest::prelude::*;
use wei25519::{Scalar, Signature, SigningKey, VerifyingKey};

/// The canonical encoding of arbitrary bytes reduced mod n.
fn canonical(bytes: [u8; 32]) -> [u8; 32] {
    Scalar::from_bytes_mod_order(&bytes).to_bytes()
}

proptest! {
    #[test]
    fn sign_verify_round_trip(
        d in any::<[u8; 32]>(),
        k in any::<[u8; 32]>(),
        digest in any::<[u8; 32]>(),
    ) {
        let (d, k) = (canonical(d), canonical(k));
        prop_assume!(d != [0u8; 32] && k != [0u8; 32]);

        let key = SigningKey::from_bytes(&d).unwrap();
        let signature = key.sign(&digest, &k).unwrap();

        prop_assert!(key.verifying_key().verify(&digest, &signature).is_ok());

        // the serialized forms round-trip through parsing
        let parsed = Signature::from_bytes(&signature.to_bytes()).unwrap();
        let parsed_key = VerifyingKey::from_bytes(&key.verifying_key().to_bytes()).unwrap();
        prop_assert!(parsed_key.verify(&digest, &parsed).is_ok());
    }

    #[test]
    fn other_digests_are_rejected(
        d in any::<[u8; 32]>(),
        k in any::<[u8; 32]>(),
        digest in any::<[u8; 32]>(),
        other in any::<[u8; 32]>(),
    ) {
        // the top 253 bits are what the signature binds
        prop_assume!(digest[..31] != other[..31] || digest[31] >> 3 != other[31] >> 3);

        let (d, k) = (canonical(d), canonical(k));
        prop_assume!(d != [0u8; 32] && k != [0u8; 32]);

        let key = SigningKey::from_bytes(&d).unwrap();
        let signature = key.sign(&digest, &k).unwrap();

        prop_assert!(key.verifying_key().verify(&other, &signature).is_err());
    }
}
