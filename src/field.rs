//! The prime field GF(2²⁵⁵ − 19) and the scalar field of the prime-order
//! subgroup shared by all three curve forms.

mod element;
mod scalar;

pub use element::FieldElement;
pub use scalar::{Scalar, ORDER};

use crate::edwards::EdwardsPoint;

use crypto_bigint::{
    impl_modulus,
    modular::constant_mod::{Residue, ResidueParams},
    U256,
};

impl_modulus!(
    FieldModulus,
    U256,
    "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"
);

pub(crate) type ResidueType = Residue<FieldModulus, { FieldModulus::LIMBS }>;

/// The Ed25519 base point in extended coordinates.
pub const ED25519_BASE_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement(ResidueType::new(&U256::from_be_hex(
        "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
    ))),
    Y: FieldElement(ResidueType::new(&U256::from_be_hex(
        "6666666666666666666666666666666666666666666666666666666666666658",
    ))),
    Z: FieldElement::ONE,
    T: FieldElement(ResidueType::new(&U256::from_be_hex(
        "67875f0fd78b766566ea4e8e64abe37d20f09f80775152f56dde8ab3a5b7dda3",
    ))),
};

/// The x-coordinate of the Curve25519 base point.
pub(crate) const MONTGOMERY_BASE_X: FieldElement =
    FieldElement(ResidueType::new(&U256::from_u64(9)));

/// The y-coordinate of the Curve25519 base point.
pub(crate) const MONTGOMERY_BASE_Y: FieldElement = FieldElement(ResidueType::new(
    &U256::from_be_hex("20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9"),
));
