//! The short Weierstrass form Wei25519: y² = x³ + a·x + b.
//!
//! This is the same group as the Montgomery and Edwards forms; the
//! x-coordinate is the Montgomery x shifted by δ = (p + A)/3 and the
//! y-coordinate carries over unchanged. The point at infinity is not
//! representable as a coordinate pair.

use core::fmt::{self, Debug, Formatter};

use crypto_bigint::U256;
use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::edwards::AffinePoint;
use crate::field::{FieldElement, ResidueType, MONTGOMERY_BASE_Y};
use crate::montgomery::MontgomeryPoint;

/// An affine point on the Weierstrass curve.
#[derive(Copy, Clone, Default, Eq)]
pub struct WeierstrassPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Debug for WeierstrassPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "WeierstrassPoint({:?}, {:?})", self.x, self.y)
    }
}

impl ConstantTimeEq for WeierstrassPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl ConditionallySelectable for WeierstrassPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl PartialEq for WeierstrassPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl WeierstrassPoint {
    /// The Weierstrass image of the shared base point: (9 + δ, base y).
    pub const GENERATOR: Self = Self {
        x: FieldElement(ResidueType::new(&U256::from_be_hex(
            "2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad245a",
        ))),
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

    /// Checks y² = x³ + a·x + b.
    pub fn is_on_curve(&self) -> Choice {
        let rhs = (self.x.square() + FieldElement::WEI_A) * self.x + FieldElement::WEI_B;
        self.y.square().ct_eq(&rhs)
    }

    /// Recover a point from its x-coordinate and the desired parity (low
    /// bit) of its y-coordinate.
    ///
    /// The y-coordinate is y = ±√(x³ + a·x + b), with the sign chosen
    /// branchlessly so that the low bit of y equals `sign`. Returns `None`
    /// when no point with the given x lies on the curve.
    pub fn from_x(x: &FieldElement, sign: Choice) -> CtOption<Self> {
        let t = (x.square() + FieldElement::WEI_A) * x + FieldElement::WEI_B;
        let x = *x;

        t.sqrt().map(|mut y| {
            y.conditional_negate(y.is_negative() ^ sign);
            Self { x, y }
        })
    }

    /// Map this point to the Montgomery form: the y-coordinate carries
    /// over and x shifts by −δ, with wx = 0 mapping to mx = 0 by
    /// convention.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        let mx = FieldElement::conditional_select(
            &(self.x - FieldElement::DELTA),
            &FieldElement::ZERO,
            self.x.is_zero(),
        );
        MontgomeryPoint::new_unchecked(mx, self.y)
    }

    /// Map this point to the Edwards form. With pa = 3·wx − A:
    /// ex = c·pa/(3·wy), ey = (pa − 3)/(pa + 3).
    ///
    /// The exceptional points (A/3, 0) and the point at infinity have no
    /// Edwards image and must not be passed.
    pub fn to_edwards(&self) -> AffinePoint {
        let pa = FieldElement::THREE * self.x - FieldElement::CURVE_A;

        let ex = FieldElement::SQRT_MINUS_A_PLUS_TWO * pa * (FieldElement::THREE * self.y).invert();
        let ey = (pa - FieldElement::THREE) * (pa + FieldElement::THREE).invert();

        AffinePoint::new_unchecked(ex, ey)
    }
}
