//! This crate provides a pure Rust implementation of the curve25519 group
//! in its three birationally equivalent forms (Montgomery, twisted Edwards
//! and short Weierstrass), together with ECDSA signatures over the
//! Weierstrass form Wei25519.
//!
//! All field and scalar values are 32-byte little-endian encodings.
//! Hashing and randomness are the caller's: signing takes a precomputed
//! 32-byte digest and a caller-supplied nonce.
//!
//! # Diffie-Hellman
//! ```
//! use wei25519::{x25519, MontgomeryXPoint};
//!
//! let alice_secret = [0x11u8; 32];
//! let bob_secret = [0x22u8; 32];
//!
//! let alice_public = x25519(&alice_secret, MontgomeryXPoint::GENERATOR.as_bytes());
//! let bob_public = x25519(&bob_secret, MontgomeryXPoint::GENERATOR.as_bytes());
//!
//! assert_eq!(
//!     x25519(&alice_secret, &bob_public),
//!     x25519(&bob_secret, &alice_public),
//! );
//! ```
//!
//! # Signing
//! ```
//! use wei25519::SigningKey;
//!
//! let mut secret = [0x42u8; 32];
//! secret[31] = 0x05;
//! let signing_key = SigningKey::from_bytes(&secret).unwrap();
//!
//! // the caller hashes the message and draws a fresh nonce
//! let digest = [0x24u8; 32];
//! let nonce = [0x99u8; 32];
//!
//! let signature = signing_key.sign(&digest, &nonce).unwrap();
//! assert!(signing_key.verifying_key().verify(&digest, &signature).is_ok());
//! ```
//!
//! # Changing curve forms
//! ```
//! use wei25519::AffinePoint;
//!
//! let g = AffinePoint::GENERATOR;
//! assert_eq!(g.to_weierstrass().to_edwards(), g);
//! assert_eq!(g.to_montgomery().to_edwards(), g);
//! ```

#![no_std]
#![forbid(unsafe_code)]
#![allow(non_snake_case)]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![warn(
    clippy::unwrap_used,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unused_attributes,
    unused_imports,
    unused_mut,
    unused_must_use
)]

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub use subtle;

pub(crate) mod ecdsa;
pub(crate) mod edwards;
pub(crate) mod field;
pub(crate) mod montgomery;
pub(crate) mod weierstrass;

pub use ecdsa::{
    Error, Signature, SigningKey, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
pub use edwards::{AffinePoint, EdwardsPoint};
pub use field::{FieldElement, Scalar, ORDER};
pub use montgomery::{clamp_scalar, MontgomeryPoint, MontgomeryXPoint};
pub use weierstrass::WeierstrassPoint;

/// The X25519 Diffie-Hellman function: multiply the point with
/// x-coordinate `x` by the clamped `scalar` and return the resulting
/// x-coordinate.
///
/// The scalar is clamped per RFC 7748 before use, so pre-clamped scalars
/// pass through unchanged. The x-coordinate is interpreted as a 256-bit
/// little-endian integer modulo p. Constant time in the scalar.
pub fn x25519(scalar: &[u8; 32], x: &[u8; 32]) -> [u8; 32] {
    MontgomeryXPoint(*x).mul_clamped(scalar).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diffie_hellman_agreement() {
        let a = [0x5au8; 32];
        let b = [0xc3u8; 32];

        let base = MontgomeryXPoint::GENERATOR.as_bytes();
        let a_pub = x25519(&a, base);
        let b_pub = x25519(&b, base);

        assert_eq!(x25519(&a, &b_pub), x25519(&b, &a_pub));
    }
}
