//! The Montgomery form Curve25519: y² = x³ + A·x² + x with A = 486662.
//!
//! Scalar multiplication runs on x-only XZ pairs through the projective
//! ladder; the Okeya–Sakurai procedure recovers the y-coordinate of the
//! result from the ladder's terminal state when a full point is needed.

use core::fmt::{self, Debug, Formatter};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::DefaultIsZeroes;

use crate::edwards::AffinePoint;
use crate::field::{FieldElement, MONTGOMERY_BASE_X, MONTGOMERY_BASE_Y};
use crate::weierstrass::WeierstrassPoint;

/// Apply the RFC 7748 scalar clamp: clear the low three bits, clear the
/// top bit and set bit 254.
pub fn clamp_scalar(mut scalar: [u8; 32]) -> [u8; 32] {
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
    scalar
}

/// The affine x-coordinate of a point, as 32 little-endian bytes.
#[derive(Copy, Clone)]
pub struct MontgomeryXPoint(pub [u8; 32]);

impl Default for MontgomeryXPoint {
    fn default() -> Self {
        Self([0u8; 32])
    }
}

#[cfg(feature = "zeroize")]
impl DefaultIsZeroes for MontgomeryXPoint {}

impl Debug for MontgomeryXPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0[..].fmt(f)
    }
}

impl ConstantTimeEq for MontgomeryXPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for MontgomeryXPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for MontgomeryXPoint {}

impl MontgomeryXPoint {
    /// The base point's x-coordinate, 9.
    pub const GENERATOR: Self = Self([
        0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00,
    ]);

    /// View the coordinate as bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Multiply the point with this x-coordinate by a scalar.
    ///
    /// The scalar is clamped per RFC 7748 before the ladder runs (a no-op
    /// for already-clamped input). Constant time in the scalar.
    pub fn mul_clamped(&self, scalar: &[u8; 32]) -> MontgomeryXPoint {
        let e = clamp_scalar(*scalar);
        let x = FieldElement::from_bytes(&self.0);
        let (pm, _) = ladder(&x, &e);
        pm.to_affine()
    }

    /// The x-coordinate of the Montgomery image of an Edwards point with
    /// y-coordinate `ey`: mx = (1 + ey)/(1 − ey). Undefined at ey = 1.
    pub fn from_edwards_y(ey: &FieldElement) -> Self {
        let mx = (FieldElement::ONE + ey) * (FieldElement::ONE - ey).invert();
        Self(mx.to_bytes())
    }

    /// The Edwards y-coordinate of the point with this x-coordinate:
    /// ey = (mx − 1)/(mx + 1). Undefined at mx = −1.
    pub fn to_edwards_y(&self) -> FieldElement {
        let mx = FieldElement::from_bytes(&self.0);
        (mx - FieldElement::ONE) * (mx + FieldElement::ONE).invert()
    }

    /// The Weierstrass x-coordinate wx = mx + δ.
    ///
    /// By convention mx = 0 (the 2-torsion point, standing in for the
    /// unrepresentable point at infinity) maps to wx = 0 rather than δ.
    pub fn to_weierstrass_x(&self) -> FieldElement {
        let mx = FieldElement::from_bytes(&self.0);
        FieldElement::conditional_select(&(mx + FieldElement::DELTA), &FieldElement::ZERO, mx.is_zero())
    }

    /// The Montgomery x-coordinate mx = wx − δ, with the same zero
    /// convention as [`MontgomeryXPoint::to_weierstrass_x`].
    pub fn from_weierstrass_x(wx: &FieldElement) -> Self {
        let mx =
            FieldElement::conditional_select(&(*wx - FieldElement::DELTA), &FieldElement::ZERO, wx.is_zero());
        Self(mx.to_bytes())
    }
}

/// An x-coordinate in projective form: x = X/Z, with Z = 0 encoding the
/// point at infinity.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectiveXPoint {
    pub(crate) X: FieldElement,
    pub(crate) Z: FieldElement,
}

impl ConditionallySelectable for ProjectiveXPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
        }
    }
}

impl ProjectiveXPoint {
    /// The point at infinity, in the (1, 0) encoding the ladder expects
    /// for its initial predecessor.
    pub const IDENTITY: Self = Self {
        X: FieldElement::ONE,
        Z: FieldElement::ZERO,
    };

    /// Double this point:
    /// X₃ = (X₁² − Z₁²)², Z₃ = 4·X₁·Z₁·(X₁² + A·X₁·Z₁ + Z₁²).
    fn double(&self) -> Self {
        let xx = self.X.square();
        let zz = self.Z.square();
        let xz = self.X * self.Z;

        let X = (xx - zz).square();
        let Z = (xz * (xx + FieldElement::CURVE_A * xz + zz)).double().double();

        Self { X, Z }
    }

    /// Add two points whose difference has the known x-coordinate `diff`.
    fn differential_add(diff: &Self, p: &Self, q: &Self) -> Self {
        let a = p.X + p.Z;
        let b = p.X - p.Z;
        let c = q.X + q.Z;
        let d = q.X - q.Z;

        let da = d * a;
        let cb = c * b;

        Self {
            X: diff.Z * (da + cb).square(),
            Z: diff.X * (da - cb).square(),
        }
    }

    /// Convert to the affine x-coordinate with one inversion.
    fn to_affine(&self) -> MontgomeryXPoint {
        let x = self.X * self.Z.invert();
        MontgomeryXPoint(x.to_bytes())
    }
}

/// The projective ladder.
///
/// Maintains P_m and its predecessor P_{m−1}, whose x-difference is the
/// input point, walking the scalar from bit 253 down to bit 0 (bit 254 is
/// set by the clamp). Each iteration performs one doubling and two
/// differential additions and routes the results through branchless
/// selects, so its shape is independent of the scalar bits.
///
/// Returns the terminal (P_m, P_{m−1}) = (x(eP), x((e−1)P)).
fn ladder(x: &FieldElement, scalar: &[u8; 32]) -> (ProjectiveXPoint, ProjectiveXPoint) {
    let base = ProjectiveXPoint {
        X: *x,
        Z: FieldElement::ONE,
    };

    let mut pm = base;
    let mut pm1 = ProjectiveXPoint::IDENTITY;

    for i in (0..254).rev() {
        let bit = Choice::from((scalar[i >> 3] >> (i & 7)) & 1);

        // From P_m and P_{m−1}, compute P_{2m−1}, P_{2m} and P_{2m+1}
        let p2m1 = ProjectiveXPoint::differential_add(&base, &pm, &pm1);
        let p2m = pm.double();
        let p2m1p = ProjectiveXPoint::differential_add(&p2m1, &p2m, &base);

        // bit = 1 --> (P_{2m+1}, P_{2m}), bit = 0 --> (P_{2m}, P_{2m−1})
        pm1 = ProjectiveXPoint::conditional_select(&p2m1, &p2m, bit);
        pm = ProjectiveXPoint::conditional_select(&p2m, &p2m1p, bit);
    }

    (pm, pm1)
}

/// Okeya–Sakurai y-coordinate recovery.
///
/// Given the affine point P = (x, y), x(Q) and x(P + Q), produces Q in
/// projective (X : Y : Z) form. Requires P ∉ E[2] and Q ∉ {P, −P, O}.
fn recover_y(
    p: &MontgomeryPoint,
    q: &ProjectiveXPoint,
    sum: &ProjectiveXPoint,
) -> (FieldElement, FieldElement, FieldElement) {
    let mut v1 = p.x * q.Z;
    let mut v2 = q.X + v1;
    let v3 = (q.X - v1).square() * sum.X;

    v1 = FieldElement::TWO_A * q.Z;
    v2 += v1;

    let v4 = p.x * q.X + q.Z;
    v2 *= v4;
    v1 *= q.Z;
    v2 = (v2 - v1) * sum.Z;

    let y = v2 - v3;

    // 2B·y_P·Z_Q·Z_D with B = 1
    v1 = p.y.double() * q.Z * sum.Z;

    (v1 * q.X, y, v1 * q.Z)
}

/// A full affine point on the Montgomery curve.
#[derive(Copy, Clone, Default, Eq)]
pub struct MontgomeryPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Debug for MontgomeryPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "MontgomeryPoint({:?}, {:?})", self.x, self.y)
    }
}

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl ConditionallySelectable for MontgomeryPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl MontgomeryPoint {
    /// The Curve25519 base point.
    pub const GENERATOR: Self = Self {
        x: MONTGOMERY_BASE_X,
        y: MONTGOMERY_BASE_Y,
    };

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

    /// Checks y² = x³ + A·x² + x.
    pub fn is_on_curve(&self) -> Choice {
        let xx = self.x.square();
        let rhs = xx * self.x + FieldElement::CURVE_A * xx + self.x;
        self.y.square().ct_eq(&rhs)
    }

    /// Multiply this point by a scalar, producing a full affine point.
    ///
    /// Runs the x-only ladder, derives x(P + Q) from the ladder's
    /// terminal pair with one extra differential addition, then recovers
    /// the y-coordinate. The scalar is clamped per RFC 7748 first (a
    /// no-op for already-clamped input). Constant time in the scalar.
    pub fn mul_clamped(&self, scalar: &[u8; 32]) -> MontgomeryPoint {
        let e = clamp_scalar(*scalar);
        let base = ProjectiveXPoint {
            X: self.x,
            Z: FieldElement::ONE,
        };

        let (pm, pm1) = ladder(&self.x, &e);

        // The terminal predecessor is x(Q − P); adding Q and P with that
        // difference yields the x(P + Q) the recovery needs.
        let sum = ProjectiveXPoint::differential_add(&pm1, &pm, &base);
        let (xq, yq, zq) = recover_y(self, &pm, &sum);

        let z_inv = zq.invert();
        Self {
            x: xq * z_inv,
            y: yq * z_inv,
        }
    }

    /// Map this point to the Edwards form:
    /// ex = c·mx/my, ey = (mx − 1)/(mx + 1).
    ///
    /// The exceptional points (0, 0) and the point at infinity have no
    /// Edwards image and must not be passed.
    pub fn to_edwards(&self) -> AffinePoint {
        let ex = FieldElement::SQRT_MINUS_A_PLUS_TWO * self.x * self.y.invert();
        let ey = (self.x - FieldElement::ONE) * (self.x + FieldElement::ONE).invert();
        AffinePoint::new_unchecked(ex, ey)
    }

    /// Map this point to the Weierstrass form: the y-coordinate carries
    /// over and x shifts by δ, with mx = 0 mapping to wx = 0 by
    /// convention.
    pub fn to_weierstrass(&self) -> WeierstrassPoint {
        let wx = FieldElement::conditional_select(
            &(self.x + FieldElement::DELTA),
            &FieldElement::ZERO,
            self.x.is_zero(),
        );
        WeierstrassPoint::new_unchecked(wx, self.y)
    }
}
