//! The twisted Edwards form Ed25519: −x² + y² = 1 + d·x²·y².
//!
//! Points are kept in extended homogeneous coordinates (X, Y, Z, T) with
//! x = X/Z, y = Y/Z and x·y = T/Z, which admit complete addition formulas
//! for a = −1.

use core::fmt::{self, Debug, Formatter};
use core::ops::Mul;

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::field::{FieldElement, Scalar, ED25519_BASE_POINT};
use crate::montgomery::MontgomeryPoint;
use crate::weierstrass::WeierstrassPoint;

/// An affine point on the Edwards curve.
#[derive(Copy, Clone, Default, Eq)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Debug for AffinePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AffinePoint({:?}, {:?})", self.x, self.y)
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl AffinePoint {
    /// The neutral element (0, 1).
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
    };

    /// The Ed25519 base point.
    pub const GENERATOR: Self = Self {
        x: ED25519_BASE_POINT.X,
        y: ED25519_BASE_POINT.Y,
    };

    /// Construct a point from raw coordinates without checking the curve
    /// equation.
    pub(crate) const fn new_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y }
    }

    /// The affine x-coordinate.
    pub fn x(&self) -> FieldElement {
        self.x
    }

    /// The affine y-coordinate.
    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// Checks −x² + y² = 1 + d·x²·y².
    pub fn is_on_curve(&self) -> Choice {
        let xx = self.x.square();
        let yy = self.y.square();
        (yy - xx).ct_eq(&(FieldElement::ONE + FieldElement::EDWARDS_D * xx * yy))
    }

    /// Recover a point from its y-coordinate and the parity of its
    /// x-coordinate.
    ///
    /// The x-coordinate is x = ±√((y² − 1)/(1 + d·y²)), with the sign
    /// chosen branchlessly so that the low bit of x equals `x_parity`.
    /// Returns `None` when no point with the given y lies on the curve.
    pub fn from_y(y: &FieldElement, x_parity: Choice) -> CtOption<Self> {
        let yy = y.square();
        let u = yy - FieldElement::ONE;
        let v = FieldElement::EDWARDS_D * yy + FieldElement::ONE;
        let y = *y;

        (u * v.invert()).sqrt().map(|mut x| {
            x.conditional_negate(x.is_negative() ^ x_parity);
            Self { x, y }
        })
    }

    /// Map this point to the Montgomery form:
    /// mx = (1 + y)/(1 − y), my = c·(1 + y)/((1 − y)·x).
    ///
    /// The exceptional points (0, ±1) have no Montgomery image and must
    /// not be passed.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        let num = FieldElement::ONE + self.y;
        let den = FieldElement::ONE - self.y;

        let mx = num * den.invert();
        let my = FieldElement::SQRT_MINUS_A_PLUS_TWO * num * (den * self.x).invert();

        MontgomeryPoint::new_unchecked(mx, my)
    }

    /// Map this point to the Weierstrass form.
    ///
    /// Same domain restriction as [`AffinePoint::to_montgomery`].
    pub fn to_weierstrass(&self) -> WeierstrassPoint {
        self.to_montgomery().to_weierstrass()
    }
}

/// A point on the Edwards curve in extended homogeneous coordinates.
#[derive(Copy, Clone, Eq)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EdwardsPoint({:?}, {:?}, {:?}, {:?})",
            self.X, self.Y, self.Z, self.T
        )
    }
}

impl Default for EdwardsPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // X1/Z1 == X2/Z2 and Y1/Z1 == Y2/Z2, cross-multiplied
        let XZ = self.X * other.Z;
        let ZX = self.Z * other.X;
        let YZ = self.Y * other.Z;
        let ZY = self.Z * other.Y;
        XZ.ct_eq(&ZX) & YZ.ct_eq(&ZY)
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Y: FieldElement::conditional_select(&a.Y, &b.Y, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
            T: FieldElement::conditional_select(&a.T, &b.T, choice),
        }
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<&AffinePoint> for EdwardsPoint {
    fn from(point: &AffinePoint) -> Self {
        Self {
            X: point.x,
            Y: point.y,
            Z: FieldElement::ONE,
            T: point.x * point.y,
        }
    }
}

impl From<AffinePoint> for EdwardsPoint {
    fn from(point: AffinePoint) -> Self {
        (&point).into()
    }
}

impl Mul<&Scalar> for &EdwardsPoint {
    type Output = EdwardsPoint;

    fn mul(self, scalar: &Scalar) -> EdwardsPoint {
        self.scalar_mul(scalar)
    }
}

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);

impl Mul<&EdwardsPoint> for &Scalar {
    type Output = EdwardsPoint;

    fn mul(self, point: &EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl EdwardsPoint {
    /// The neutral element (0 : 1 : 1 : 0).
    pub const IDENTITY: Self = Self {
        X: FieldElement::ZERO,
        Y: FieldElement::ONE,
        Z: FieldElement::ONE,
        T: FieldElement::ZERO,
    };

    /// The Ed25519 base point.
    pub const GENERATOR: Self = ED25519_BASE_POINT;

    /// Add two points with the a = −1 extended-coordinate formulas.
    pub fn add(&self, other: &EdwardsPoint) -> Self {
        let a = (self.Y - self.X) * (other.Y - other.X);
        let b = (self.Y + self.X) * (other.Y + other.X);
        let c = self.T * FieldElement::EDWARDS_2D * other.T;
        let d = self.Z.double() * other.Z;

        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;

        Self {
            X: e * f,
            Y: g * h,
            Z: f * g,
            T: e * h,
        }
    }

    /// Double this point.
    pub fn double(&self) -> Self {
        let a = self.X.square();
        let b = self.Y.square();
        let c = self.Z.square().double();
        let d = -a;

        let e = (self.X + self.Y).square() - a - b;
        let g = d + b;
        let f = g - c;
        let h = d - b;

        Self {
            X: e * f,
            Y: g * h,
            Z: f * g,
            T: e * h,
        }
    }

    /// The negation of this point.
    pub fn negate(&self) -> Self {
        Self {
            X: -self.X,
            Y: self.Y,
            Z: self.Z,
            T: -self.T,
        }
    }

    /// Constant-time scalar multiplication.
    ///
    /// Runs a fixed 256-iteration double-and-conditional-add loop over the
    /// scalar's raw bits, so unreduced scalars (e.g. clamped
    /// Diffie-Hellman values) multiply by their full 256-bit value.
    pub fn scalar_mul(&self, scalar: &Scalar) -> Self {
        let bits = scalar.bits();
        let mut result = Self::IDENTITY;

        for i in (0..256).rev() {
            result = result.double();
            let sum = result.add(self);
            result.conditional_assign(&sum, Choice::from(bits[i] as u8));
        }

        result
    }

    /// Checks the extended-coordinate invariants: T·Z = X·Y and
    /// −X² + Y² = Z² + d·T².
    pub fn is_on_curve(&self) -> Choice {
        let XY = self.X * self.Y;
        let TZ = self.T * self.Z;

        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let TT = self.T.square();

        XY.ct_eq(&TZ) & (YY - XX).ct_eq(&(ZZ + FieldElement::EDWARDS_D * TT))
    }

    /// Convert to affine coordinates with a single field inversion.
    pub fn to_affine(&self) -> AffinePoint {
        let z_inv = self.Z.invert();

        AffinePoint {
            x: self.X * z_inv,
            y: self.Y * z_inv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        assert!(bool::from(EdwardsPoint::GENERATOR.is_on_curve()));
        assert!(bool::from(AffinePoint::GENERATOR.is_on_curve()));
    }

    #[test]
    fn identity_laws() {
        let g = EdwardsPoint::GENERATOR;
        assert_eq!(g.add(&EdwardsPoint::IDENTITY), g);
        assert_eq!(g.add(&g.negate()), EdwardsPoint::IDENTITY);
        assert!(bool::from(EdwardsPoint::IDENTITY.is_on_curve()));
    }

    #[test]
    fn doubling_matches_addition() {
        let g = EdwardsPoint::GENERATOR;
        assert_eq!(g.double(), g.add(&g));
        assert!(bool::from(g.double().is_on_curve()));
    }

    #[test]
    fn scalar_mul_small_multiples() {
        let g = EdwardsPoint::GENERATOR;

        assert_eq!(g.scalar_mul(&Scalar::ZERO), EdwardsPoint::IDENTITY);
        assert_eq!(g.scalar_mul(&Scalar::ONE), g);
        assert_eq!(g.scalar_mul(&Scalar::from(2u8)), g.double());

        let five = g.add(&g).add(&g).add(&g).add(&g);
        assert_eq!(g.scalar_mul(&Scalar::from(5u8)), five);
    }

    #[test]
    fn scalar_mul_distributes() {
        let g = EdwardsPoint::GENERATOR;
        let a = Scalar::from(123_456_789u32);
        let b = Scalar::from(987_654_321u32);

        let lhs = g.scalar_mul(&a).add(&g.scalar_mul(&b));
        let rhs = g.scalar_mul(&(a + b));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn affine_round_trip() {
        let g = EdwardsPoint::GENERATOR;
        let p = g.scalar_mul(&Scalar::from(7u8));
        let affine = p.to_affine();
        assert!(bool::from(affine.is_on_curve()));
        assert_eq!(EdwardsPoint::from(affine), p);
    }

    #[test]
    fn decompression_recovers_generator() {
        let g = AffinePoint::GENERATOR;

        let recovered = AffinePoint::from_y(&g.y, g.x.is_negative()).unwrap();
        assert_eq!(recovered, g);

        // the complementary parity yields the negation
        let negated = AffinePoint::from_y(&g.y, !g.x.is_negative()).unwrap();
        assert_eq!(negated.x, -g.x);
        assert!(bool::from(negated.is_on_curve()));
    }

    #[test]
    fn decompression_rejects_off_curve_y() {
        // y = 2 gives (y² − 1)/(1 + d·y²) a non-residue
        let y = FieldElement::from(2u32);
        assert!(bool::from(AffinePoint::from_y(&y, Choice::from(0)).is_none()));
    }
}
