//! ECDSA over the Weierstrass form Wei25519.
//!
//! The scalar multiplications run on the Edwards engine; results are
//! mapped into and out of the Weierstrass form, whose x-coordinate feeds
//! the signature scalar r.
//!
//! Hashing and randomness stay with the caller: [`SigningKey::sign`] takes
//! a precomputed 32-byte message digest and a fresh 32-byte nonce. A bad
//! nonce (zero, or one whose derived r or s vanishes) is reported as
//! [`Error::BadNonce`] and the caller retries with a new nonce.

use core::fmt::{self, Debug, Display, Formatter};

use crypto_bigint::U256;
use subtle::ConstantTimeEq;

use crate::edwards::EdwardsPoint;
use crate::field::{FieldElement, Scalar};
use crate::weierstrass::WeierstrassPoint;

/// Length of a serialized signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of a serialized public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 64;

/// Signing and verification errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The nonce is unusable (zero, or it produced r = 0 or s = 0);
    /// retry with a fresh nonce
    BadNonce,
    /// Secret key bytes are out of range
    InvalidSecretKey,
    /// Public key coordinates are not a valid curve point
    InvalidPublicKey,
    /// Signature scalars are out of range
    InvalidSignature,
    /// Signature verification failed
    Verify,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadNonce => write!(f, "unusable nonce, retry with a fresh one"),
            Error::InvalidSecretKey => write!(f, "secret key bytes are out of range"),
            Error::InvalidPublicKey => write!(f, "public key is not a valid curve point"),
            Error::InvalidSignature => write!(f, "signature scalars are out of range"),
            Error::Verify => write!(f, "signature verification failed"),
        }
    }
}

impl core::error::Error for Error {}

/// An ECDSA signature: the pair (r, s), both in [1, n − 1].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// The r component.
    pub fn r(&self) -> Scalar {
        self.r
    }

    /// The s component.
    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Serialize as r ‖ s, each 32 bytes little-endian.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&self.r.to_bytes());
        bytes[32..].copy_from_slice(&self.s.to_bytes());
        bytes
    }

    /// Deserialize from r ‖ s, rejecting scalars outside [1, n − 1].
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Result<Self, Error> {
        let mut r = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        let mut s = [0u8; 32];
        s.copy_from_slice(&bytes[32..]);

        let r = Option::<Scalar>::from(Scalar::from_canonical_bytes(&r))
            .ok_or(Error::InvalidSignature)?;
        let s = Option::<Scalar>::from(Scalar::from_canonical_bytes(&s))
            .ok_or(Error::InvalidSignature)?;

        if bool::from(r.is_zero() | s.is_zero()) {
            return Err(Error::InvalidSignature);
        }

        Ok(Self { r, s })
    }
}

/// An ECDSA verification key: a point on Wei25519.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    point: WeierstrassPoint,
}

impl VerifyingKey {
    /// Construct a verification key from a curve point.
    pub fn from_point(point: WeierstrassPoint) -> Result<Self, Error> {
        if bool::from(point.is_on_curve()) {
            Ok(Self { point })
        } else {
            Err(Error::InvalidPublicKey)
        }
    }

    /// The underlying Weierstrass point.
    pub fn as_point(&self) -> &WeierstrassPoint {
        &self.point
    }

    /// Serialize as wx ‖ wy, each 32 bytes little-endian.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes[..32].copy_from_slice(&self.point.x().to_bytes());
        bytes[32..].copy_from_slice(&self.point.y().to_bytes());
        bytes
    }

    /// Deserialize from wx ‖ wy; the coordinates must be canonical and
    /// satisfy the curve equation.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, Error> {
        let mut wx = [0u8; 32];
        wx.copy_from_slice(&bytes[..32]);
        let mut wy = [0u8; 32];
        wy.copy_from_slice(&bytes[32..]);

        let x = FieldElement::from_bytes(&wx);
        let y = FieldElement::from_bytes(&wy);
        if x.to_bytes() != wx || y.to_bytes() != wy {
            return Err(Error::InvalidPublicKey);
        }

        Self::from_point(WeierstrassPoint::new_unchecked(x, y))
    }

    /// Verify a signature over a 32-byte message digest.
    ///
    /// Computes R = u₁·G + u₂·Q on the Edwards curve with u₁ = z·s⁻¹ and
    /// u₂ = r·s⁻¹, maps R to Wei25519 and accepts iff its x-coordinate is
    /// congruent to r modulo n. This path handles only public data and is
    /// not constant time.
    pub fn verify(&self, digest: &[u8; 32], signature: &Signature) -> Result<(), Error> {
        let r = signature.r;
        let s = signature.s;
        if bool::from(r.is_zero() | s.is_zero()) {
            return Err(Error::InvalidSignature);
        }

        let z = reduce_digest(digest);
        let w = s.invert();
        let u1 = z * w;
        let u2 = r * w;

        let q = EdwardsPoint::from(self.point.to_edwards());
        let big_r = EdwardsPoint::GENERATOR
            .scalar_mul(&u1)
            .add(&q.scalar_mul(&u2));

        let wx = big_r.to_affine().to_weierstrass().x();
        let rx = Scalar::from_bytes_mod_order(&wx.to_bytes());

        if bool::from(rx.ct_eq(&r)) {
            Ok(())
        } else {
            Err(Error::Verify)
        }
    }
}

/// An ECDSA signing key.
#[derive(Clone)]
pub struct SigningKey {
    secret: Scalar,
    verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Construct a signing key from secret scalar bytes.
    ///
    /// The bytes must encode a canonical scalar in [1, n − 1]. The
    /// verification key d·G is derived through the Edwards engine in
    /// constant time.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let secret = Option::<Scalar>::from(Scalar::from_canonical_bytes(bytes))
            .ok_or(Error::InvalidSecretKey)?;
        if bool::from(secret.is_zero()) {
            return Err(Error::InvalidSecretKey);
        }

        let public = EdwardsPoint::GENERATOR
            .scalar_mul(&secret)
            .to_affine()
            .to_weierstrass();

        Ok(Self {
            secret,
            verifying_key: VerifyingKey { point: public },
        })
    }

    /// Serialize the secret scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }

    /// The corresponding verification key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Sign a 32-byte message digest with a caller-supplied 32-byte nonce.
    ///
    /// The nonce must be unpredictable and never repeat for the same key.
    /// r is the x-coordinate of k·G mapped to Wei25519, reduced mod n,
    /// and s = k⁻¹·(z + r·d) mod n. Constant time in the secret key and
    /// the nonce value.
    pub fn sign(&self, digest: &[u8; 32], nonce: &[u8; 32]) -> Result<Signature, Error> {
        let k = Scalar::from_bytes_mod_order(nonce);
        if bool::from(k.is_zero()) {
            return Err(Error::BadNonce);
        }

        let r_point = EdwardsPoint::GENERATOR
            .scalar_mul(&k)
            .to_affine()
            .to_weierstrass();
        let r = Scalar::from_bytes_mod_order(&r_point.x().to_bytes());
        if bool::from(r.is_zero()) {
            return Err(Error::BadNonce);
        }

        let z = reduce_digest(digest);
        let s = k.invert() * (z + r * self.secret);
        if bool::from(s.is_zero()) {
            return Err(Error::BadNonce);
        }

        Ok(Signature { r, s })
    }
}

/// Fold a 32-byte digest into a scalar: the digest is read as a big-endian
/// 256-bit integer, shifted right by three bits (keeping its leftmost 253
/// bits, the bit length of n) and reduced mod n.
fn reduce_digest(digest: &[u8; 32]) -> Scalar {
    Scalar::reduce(U256::from_be_slice(digest).shr_vartime(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn test_key() -> SigningKey {
        let mut d = [0x42u8; 32];
        d[31] = 0x05;
        SigningKey::from_bytes(&d).unwrap()
    }

    fn test_nonce() -> [u8; 32] {
        let mut k = [0x77u8; 32];
        k[31] = 0x0a;
        k
    }

    // SHA-256("test"), supplied by the caller
    const DIGEST: [u8; 32] =
        hex!("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08");

    #[test]
    fn sign_and_verify() {
        let key = test_key();
        let signature = key.sign(&DIGEST, &test_nonce()).unwrap();
        assert!(key.verifying_key().verify(&DIGEST, &signature).is_ok());
    }

    #[test]
    fn tampered_digest_is_rejected() {
        let key = test_key();
        let signature = key.sign(&DIGEST, &test_nonce()).unwrap();

        let mut bad = DIGEST;
        bad[0] ^= 1;
        assert_eq!(
            key.verifying_key().verify(&bad, &signature),
            Err(Error::Verify)
        );
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let key = test_key();
        let signature = key.sign(&DIGEST, &test_nonce()).unwrap();
        let verifying_key = key.verifying_key();

        let mut r_flipped = signature.to_bytes();
        r_flipped[0] ^= 1;
        match Signature::from_bytes(&r_flipped) {
            Ok(sig) => assert!(verifying_key.verify(&DIGEST, &sig).is_err()),
            Err(e) => assert_eq!(e, Error::InvalidSignature),
        }

        let mut s_flipped = signature.to_bytes();
        s_flipped[32] ^= 1;
        match Signature::from_bytes(&s_flipped) {
            Ok(sig) => assert!(verifying_key.verify(&DIGEST, &sig).is_err()),
            Err(e) => assert_eq!(e, Error::InvalidSignature),
        }
    }

    #[test]
    fn wrong_key_is_rejected() {
        let key = test_key();
        let signature = key.sign(&DIGEST, &test_nonce()).unwrap();

        let mut other = [0x42u8; 32];
        other[31] = 0x06;
        let other_key = SigningKey::from_bytes(&other).unwrap();
        assert!(other_key.verifying_key().verify(&DIGEST, &signature).is_err());
    }

    #[test]
    fn corrupted_public_key_is_rejected() {
        let key = test_key();
        let mut bytes = key.verifying_key().to_bytes();
        bytes[0] ^= 1;
        assert_eq!(
            VerifyingKey::from_bytes(&bytes),
            Err(Error::InvalidPublicKey)
        );
    }

    #[test]
    fn zero_nonce_is_rejected() {
        let key = test_key();
        assert_eq!(key.sign(&DIGEST, &[0u8; 32]), Err(Error::BadNonce));
    }

    #[test]
    fn zero_signature_scalars_are_rejected() {
        let zeros = [0u8; SIGNATURE_LENGTH];
        assert_eq!(Signature::from_bytes(&zeros), Err(Error::InvalidSignature));
    }

    #[test]
    fn signature_byte_round_trip() {
        let key = test_key();
        let signature = key.sign(&DIGEST, &test_nonce()).unwrap();

        let parsed = Signature::from_bytes(&signature.to_bytes()).unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn key_byte_round_trips() {
        let key = test_key();
        assert_eq!(SigningKey::from_bytes(&key.to_bytes()).unwrap().to_bytes(), key.to_bytes());

        let verifying_key = key.verifying_key();
        assert_eq!(
            VerifyingKey::from_bytes(&verifying_key.to_bytes()).unwrap(),
            verifying_key
        );
    }

    #[test]
    fn public_key_of_one_is_the_generator() {
        let mut d = [0u8; 32];
        d[0] = 1;
        let key = SigningKey::from_bytes(&d).unwrap();
        assert_eq!(
            *key.verifying_key().as_point(),
            WeierstrassPoint::GENERATOR
        );
    }

    #[test]
    fn zero_secret_key_is_rejected() {
        assert_eq!(
            SigningKey::from_bytes(&[0u8; 32]).unwrap_err(),
            Error::InvalidSecretKey
        );
    }
}
