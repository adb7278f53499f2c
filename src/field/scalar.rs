use core::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::{Encoding, Limb, Zero, U256};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

#[cfg(feature = "zeroize")]
use zeroize::DefaultIsZeroes;

/// The order of the prime-order subgroup shared by all three curve forms:
/// n = 2²⁵² + 27742317777372353535851937790883648493.
pub const ORDER: U256 =
    U256::from_be_hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed");

/// An integer modulo the group order n.
///
/// The raw [`Scalar::from_bytes`] constructor does not reduce, so a
/// `Scalar` may also carry an unreduced 256-bit value for bit iteration
/// (clamped Diffie-Hellman scalars have bit 254 set and exceed n). Modular
/// arithmetic assumes canonical operands; use the reducing constructors
/// for anything arithmetic touches.
#[derive(Copy, Clone)]
pub struct Scalar(pub(crate) U256);

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for b in &self.to_bytes() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({:x})", self.0)
    }
}

impl LowerHex for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl UpperHex for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(U256::conditional_select(&a.0, &b.0, choice))
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for Scalar {}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::ZERO
    }
}

#[cfg(feature = "zeroize")]
impl DefaultIsZeroes for Scalar {}

impl From<u8> for Scalar {
    fn from(a: u8) -> Self {
        Scalar(U256::from_u8(a))
    }
}

impl From<u16> for Scalar {
    fn from(a: u16) -> Self {
        Scalar(U256::from_u16(a))
    }
}

impl From<u32> for Scalar {
    fn from(a: u32) -> Self {
        Scalar(U256::from_u32(a))
    }
}

impl From<u64> for Scalar {
    fn from(a: u64) -> Self {
        Scalar(U256::from_u64(a))
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &Scalar) -> Scalar {
        self.addition(rhs)
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl AddAssign<&Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &Scalar) {
        *self = *self + rhs
    }
}

impl Sub<&Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &Scalar) -> Scalar {
        self.subtract(rhs)
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs
    }
}

impl SubAssign<&Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &Scalar) {
        *self = *self - rhs
    }
}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &Scalar) -> Scalar {
        self.multiply(rhs)
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs
    }
}

impl MulAssign<&Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = *self * rhs
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar::ZERO - self
    }
}

impl Scalar {
    /// The additive identity.
    pub const ZERO: Scalar = Scalar(U256::ZERO);
    /// The multiplicative identity.
    pub const ONE: Scalar = Scalar(U256::ONE);

    /// Compute `self` + `rhs` mod n.
    pub const fn addition(&self, rhs: &Self) -> Self {
        Self(self.0.add_mod(&rhs.0, &ORDER))
    }

    /// Compute `self` - `rhs` mod n.
    pub const fn subtract(&self, rhs: &Self) -> Self {
        Self(self.0.sub_mod(&rhs.0, &ORDER))
    }

    /// Compute `self` * `rhs` mod n.
    pub const fn multiply(&self, rhs: &Self) -> Self {
        let wide = self.0.mul_wide(&rhs.0);
        Self(U256::const_rem_wide(wide, &ORDER).0)
    }

    /// Square this scalar mod n.
    pub const fn square(&self) -> Self {
        let wide = self.0.square_wide();
        Self(U256::const_rem_wide(wide, &ORDER).0)
    }

    /// Is this scalar equal to zero?
    pub fn is_zero(&self) -> Choice {
        self.0.is_zero()
    }

    /// Construct a `Scalar` from a little-endian byte representation,
    /// without reducing.
    pub fn from_bytes(bytes: &[u8; 32]) -> Scalar {
        Self(U256::from_le_slice(bytes))
    }

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo n.
    pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Scalar {
        Self::reduce(U256::from_le_slice(bytes))
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo n.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Scalar {
        let lo = U256::from_le_slice(&bytes[..32]);
        let hi = U256::from_le_slice(&bytes[32..]);
        Self(U256::const_rem_wide((lo, hi), &ORDER).0)
    }

    /// Attempt to construct a `Scalar` from a canonical byte representation.
    ///
    /// Returns `None` when the encoded value is not below n.
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let candidate = Scalar::from_bytes(bytes);

        // underflow means candidate < ORDER, thus canonical
        let (_, underflow) = candidate.0.sbb(&ORDER, Limb::ZERO);
        let underflow = Choice::from((underflow.0 >> (Limb::BITS - 1)) as u8);
        CtOption::new(candidate, underflow)
    }

    /// Convert this `Scalar` to a little-endian byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_le_bytes()
    }

    /// Reduce a 256-bit integer modulo n.
    pub(crate) const fn reduce(value: U256) -> Self {
        Self(value.const_rem(&ORDER).0)
    }

    /// Multiplicative inverse by Fermat's little theorem (exponent n − 2).
    ///
    /// Constant time in the value; the inverse of zero is zero.
    pub fn invert(&self) -> Self {
        Self::conditional_select(
            &self.exp_vartime(&[
                0x5812631a5cf5d3eb,
                0x14def9dea2f79cd6,
                0x0000000000000000,
                0x1000000000000000,
            ]),
            &Self::ZERO,
            self.is_zero(),
        )
    }

    /// Exponentiates `self` by `exp`, a little-endian sequence of 64-bit
    /// words. Variable time in the exponent only, which is always a fixed
    /// public constant here.
    pub const fn exp_vartime(&self, exp: &[u64]) -> Self {
        let mut res = Self::ONE;

        let mut i = exp.len();
        while i > 0 {
            i -= 1;

            let mut j = 64;
            while j > 0 {
                j -= 1;
                res = res.square();

                if ((exp[i] >> j) & 1) == 1 {
                    res = res.multiply(self);
                }
            }
        }

        res
    }

    /// The bits of the scalar, least significant first.
    pub(crate) fn bits(&self) -> [bool; 256] {
        let mut bits = [false; 256];
        let mut i = 0;
        for byte in self.to_bytes().iter() {
            for j in 0..8 {
                bits[i] = byte & (1 << j) != 0;
                i += 1;
            }
        }
        bits
    }
}
