use core::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::{Encoding, U256};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

#[cfg(feature = "zeroize")]
use zeroize::DefaultIsZeroes;

use super::ResidueType;

/// An element of the prime field GF(2²⁵⁵ − 19).
///
/// Elements are encoded as 32 bytes, little-endian. Decoding accepts any
/// 256-bit value and interprets it modulo p; encoding always produces the
/// canonical residue in `[0, p)`.
#[derive(Clone, Copy, Default)]
pub struct FieldElement(pub(crate) ResidueType);

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0.retrieve())
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:x})", self.0.retrieve())
    }
}

impl LowerHex for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0.retrieve())
    }
}

impl UpperHex for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.retrieve())
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(ResidueType::conditional_select(&a.0, &b.0, choice))
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for FieldElement {}

#[cfg(feature = "zeroize")]
impl DefaultIsZeroes for FieldElement {}

impl From<u32> for FieldElement {
    fn from(value: u32) -> Self {
        Self(ResidueType::new(&U256::from_u32(value)))
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.add(&other.0))
    }
}

define_add_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl AddAssign for FieldElement {
    fn add_assign(&mut self, other: FieldElement) {
        *self = *self + other;
    }
}

impl AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, other: &FieldElement) {
        *self = *self + *other;
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.sub(&other.0))
    }
}

define_sub_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, other: FieldElement) {
        *self = *self - other;
    }
}

impl SubAssign<&FieldElement> for FieldElement {
    fn sub_assign(&mut self, other: &FieldElement) {
        *self = *self - *other;
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement(self.0.mul(&other.0))
    }
}

define_mul_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, other: &FieldElement) {
        *self = *self * *other;
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, other: FieldElement) {
        *self = *self * other;
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -*self
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        Self(self.0.neg())
    }
}

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self(ResidueType::new(&U256::ZERO));
    /// The multiplicative identity.
    pub const ONE: Self = Self(ResidueType::new(&U256::ONE));
    /// 3, the divisor in the Montgomery ↔ Weierstrass x-shift.
    pub const THREE: Self = Self(ResidueType::new(&U256::from_u64(3)));
    /// The Montgomery curve coefficient A = 486662.
    pub const CURVE_A: Self = Self(ResidueType::new(&U256::from_u64(486662)));
    /// 2A = 973324, used by the y-coordinate recovery.
    pub const TWO_A: Self = Self(ResidueType::new(&U256::from_u64(973324)));
    /// δ = (p + A)/3, the x-coordinate shift between the Montgomery and
    /// Weierstrass forms.
    pub const DELTA: Self = Self(ResidueType::new(&U256::from_be_hex(
        "2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad2451",
    )));
    /// c = √(−(A + 2)), the factor relating Edwards x to Montgomery and
    /// Weierstrass y-coordinates.
    pub const SQRT_MINUS_A_PLUS_TWO: Self = Self(ResidueType::new(&U256::from_be_hex(
        "70d9120b9f5ff9442d84f723fc03b0813a5e2c2eb482e57d3391fb5500ba81e7",
    )));
    /// √−1, the twist correction applied when extracting square roots.
    pub const SQRT_MINUS_ONE: Self = Self(ResidueType::new(&U256::from_be_hex(
        "2b8324804fc1df0b2b4d00993dfbd7a72f431806ad2fe478c4ee1b274a0ea0b0",
    )));
    /// The Edwards curve coefficient d = −121665/121666.
    pub const EDWARDS_D: Self = Self(ResidueType::new(&U256::from_be_hex(
        "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
    )));
    /// 2d, used by the extended-coordinate addition formulas.
    pub const EDWARDS_2D: Self = Self(ResidueType::new(&U256::from_be_hex(
        "2406d9dc56dffce7198e80f2eef3d13000e0149a8283b156ebd69b9426b2f159",
    )));
    /// The Weierstrass curve coefficient a = (3 − A²)/3.
    pub const WEI_A: Self = Self(ResidueType::new(&U256::from_be_hex(
        "2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa984914a144",
    )));
    /// The Weierstrass curve coefficient b = (2A³ − 9A)/27.
    pub const WEI_B: Self = Self(ResidueType::new(&U256::from_be_hex(
        "7b425ed097b425ed097b425ed097b425ed097b425ed097b4260b5e9c7710c864",
    )));

    /// Decode an element from its 32-byte little-endian representation.
    ///
    /// Non-canonical encodings (values ≥ p) are accepted and reduced.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(ResidueType::new(&U256::from_le_slice(bytes)))
    }

    /// Encode this element as 32 bytes, little-endian, fully reduced.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0.retrieve().to_le_bytes()
    }

    /// Parity of the canonical encoding (its lowest bit). Used as the sign
    /// bit when selecting between a square root and its negation.
    pub fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    /// Returns 1 if this element is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    pub(crate) fn double(&self) -> Self {
        Self(self.0.add(&self.0))
    }

    /// Squares this element.
    pub fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Multiplicative inverse by Fermat's little theorem (exponent p − 2).
    ///
    /// Constant time in the value. The inverse of zero is zero; callers
    /// that care must check the input themselves.
    pub fn invert(&self) -> Self {
        const INV_EXP: U256 =
            U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeb");
        Self(self.0.pow(&INV_EXP))
    }

    /// Square root, if one exists.
    ///
    /// Computes the candidate root a^((p+3)/8) and multiplies by √−1 when
    /// the candidate's square comes out negated. The returned [`CtOption`]
    /// is `None` when the verification c² = a fails, i.e. when `self` is a
    /// non-residue.
    pub fn sqrt(&self) -> CtOption<Self> {
        const SQRT_EXP: U256 =
            U256::from_be_hex("0ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe");
        let candidate = Self(self.0.pow(&SQRT_EXP));
        let twisted = candidate * Self::SQRT_MINUS_ONE;
        let root = Self::conditional_select(&twisted, &candidate, candidate.square().ct_eq(self));
        CtOption::new(root, root.square().ct_eq(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn non_canonical_encodings_reduce() {
        // p itself decodes to zero, p + 1 to one
        let p = hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(FieldElement::from_bytes(&p), FieldElement::ZERO);

        let p_plus_one =
            hex!("eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert_eq!(FieldElement::from_bytes(&p_plus_one), FieldElement::ONE);

        // encodings are canonical and therefore idempotent
        let e = FieldElement::from_bytes(&p_plus_one);
        assert_eq!(FieldElement::from_bytes(&e.to_bytes()).to_bytes(), e.to_bytes());
    }

    #[test]
    fn invert_round_trip() {
        for i in 1..=64u32 {
            let x = FieldElement::from(i);
            assert_eq!(x * x.invert(), FieldElement::ONE);
        }
    }

    #[test]
    fn invert_zero_is_zero() {
        assert_eq!(FieldElement::ZERO.invert(), FieldElement::ZERO);
    }

    #[test]
    fn sqrt_of_squares() {
        for i in 2..=32u32 {
            let x = FieldElement::from(i);
            let root = x.square().sqrt().unwrap();
            assert!(root == x || root == -x);
        }
    }

    #[test]
    fn sqrt_of_non_residue() {
        // 2 is not a square modulo p
        let two = FieldElement::from(2u32);
        assert!(bool::from(two.sqrt().is_none()));
    }

    #[test]
    fn curve_constant_relations() {
        // 3δ = A
        assert_eq!(
            FieldElement::THREE * FieldElement::DELTA,
            FieldElement::CURVE_A
        );
        // c² = −(A + 2)
        assert_eq!(
            FieldElement::SQRT_MINUS_A_PLUS_TWO.square(),
            -(FieldElement::CURVE_A + FieldElement::from(2u32))
        );
        // (√−1)² = −1
        assert_eq!(FieldElement::SQRT_MINUS_ONE.square(), -FieldElement::ONE);
        // 2A
        assert_eq!(
            FieldElement::TWO_A,
            FieldElement::CURVE_A + FieldElement::CURVE_A
        );
        // d = −121665/121666
        assert_eq!(
            FieldElement::EDWARDS_D,
            -(FieldElement::from(121665u32) * FieldElement::from(121666u32).invert())
        );
        assert_eq!(
            FieldElement::EDWARDS_2D,
            FieldElement::EDWARDS_D.double()
        );
        // Weierstrass coefficients derived from A
        let a2 = FieldElement::CURVE_A.square();
        assert_eq!(
            FieldElement::WEI_A,
            (FieldElement::THREE - a2) * FieldElement::THREE.invert()
        );
        let a3 = a2 * FieldElement::CURVE_A;
        assert_eq!(
            FieldElement::WEI_B,
            (a3.double() - FieldElement::from(9u32) * FieldElement::CURVE_A)
                * FieldElement::from(27u32).invert()
        );
    }

    #[test]
    fn conditional_select() {
        let a = FieldElement::from(5u32);
        let b = FieldElement::from(7u32);
        assert_eq!(FieldElement::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(FieldElement::conditional_select(&a, &b, Choice::from(1)), b);
    }
}
