//! Cross-form agreement tests: the Montgomery ladder, the Edwards engine
//! and the conversion maps must all describe the same group.

use proptest::prelude::*;
use subtle::Choice;
use wei25519::{
    clamp_scalar, x25519, AffinePoint, EdwardsPoint, MontgomeryPoint, MontgomeryXPoint, Scalar,
    WeierstrassPoint,
};

proptest! {
    #[test]
    fn diffie_hellman_agreement(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let base = MontgomeryXPoint::GENERATOR.as_bytes();
        let a_pub = x25519(&a, base);
        let b_pub = x25519(&b, base);

        prop_assert_eq!(x25519(&a, &b_pub), x25519(&b, &a_pub));
    }

    #[test]
    fn ladder_agrees_with_edwards(bytes in any::<[u8; 32]>()) {
        let e = clamp_scalar(bytes);

        let mx = MontgomeryXPoint::GENERATOR.mul_clamped(&e);

        let ed = EdwardsPoint::GENERATOR.scalar_mul(&Scalar::from_bytes(&e));
        let expected = MontgomeryXPoint::from_edwards_y(&ed.to_affine().y());

        prop_assert_eq!(mx, expected);
    }

    #[test]
    fn full_point_ladder_agrees_with_edwards(bytes in any::<[u8; 32]>()) {
        let e = clamp_scalar(bytes);

        let m = MontgomeryPoint::GENERATOR.mul_clamped(&e);
        prop_assert!(bool::from(m.is_on_curve()));

        let ed = EdwardsPoint::GENERATOR
            .scalar_mul(&Scalar::from_bytes(&e))
            .to_affine();
        prop_assert_eq!(m, ed.to_montgomery());
    }

    #[test]
    fn round_trips_through_all_forms(bytes in any::<[u8; 32]>()) {
        let s = Scalar::from_bytes_mod_order(&bytes);
        prop_assume!(bool::from(!s.is_zero()));
        let e = EdwardsPoint::GENERATOR.scalar_mul(&s).to_affine();

        prop_assert_eq!(e.to_weierstrass().to_edwards(), e);
        prop_assert_eq!(e.to_montgomery().to_edwards(), e);

        let m = e.to_montgomery();
        prop_assert!(bool::from(m.is_on_curve()));
        prop_assert_eq!(m.to_weierstrass().to_montgomery(), m);

        let w = e.to_weierstrass();
        prop_assert!(bool::from(w.is_on_curve()));
        prop_assert_eq!(w.to_montgomery().to_edwards().to_weierstrass(), w);
    }

    #[test]
    fn coordinate_recovery_agrees(bytes in any::<[u8; 32]>()) {
        let s = Scalar::from_bytes_mod_order(&bytes);
        prop_assume!(bool::from(!s.is_zero()));
        let e = EdwardsPoint::GENERATOR.scalar_mul(&s).to_affine();

        let recovered = AffinePoint::from_y(&e.y(), e.x().is_negative()).unwrap();
        prop_assert_eq!(recovered, e);

        let w = e.to_weierstrass();
        let recovered = WeierstrassPoint::from_x(&w.x(), w.y().is_negative()).unwrap();
        prop_assert_eq!(recovered, w);
    }
}

#[test]
fn weierstrass_zero_convention_round_trips() {
    let two_torsion = MontgomeryXPoint([0u8; 32]);
    let wx = two_torsion.to_weierstrass_x();
    assert!(bool::from(wx.is_zero()));
    assert_eq!(MontgomeryXPoint::from_weierstrass_x(&wx), two_torsion);
}

#[test]
fn base_point_weierstrass_y_recovery() {
    let g = WeierstrassPoint::GENERATOR;

    let even = WeierstrassPoint::from_x(&g.x(), Choice::from(0)).unwrap();
    let odd = WeierstrassPoint::from_x(&g.x(), Choice::from(1)).unwrap();

    assert_eq!(even.y(), -odd.y());
    assert!(even == g || odd == g);
}
