//! Easing helpers for the intro scale animation.

use std::f32::consts::TAU;

/// Elastic ease-out: shoots past the target, then rings down onto it.
///
/// Maps `[0, 1]` onto a curve that starts at 0, overshoots 1 and decays back
/// to exactly 1. Inputs outside `[0, 1]` are clamped to the endpoints.
pub fn ease_out_elastic(t: f32) -> f32 {
    const C4: f32 = TAU / 3.0;

    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

/// Linear interpolation from `a` to `b`. `t` outside `[0, 1]` extrapolates,
/// which is what lets an overshooting ease push past the end value.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_elastic_endpoints() {
        assert_eq!(ease_out_elastic(0.0), 0.0);
        assert_eq!(ease_out_elastic(1.0), 1.0);
        assert_eq!(ease_out_elastic(-0.5), 0.0);
        assert_eq!(ease_out_elastic(1.5), 1.0);
    }

    #[test]
    fn test_ease_out_elastic_stays_in_envelope() {
        // The curve may overshoot 1 but never leaves 1 ± 2^(-10t), and it
        // never goes negative.
        for i in 0..=1000 {
            let t = i as f32 / 1000.0;
            let v = ease_out_elastic(t);
            assert!(v >= 0.0, "ease dipped below zero at t={t}: {v}");
            assert!(v <= 2.0, "ease left the overshoot envelope at t={t}: {v}");
            if t > 0.0 && t < 1.0 {
                let envelope = 2f32.powf(-10.0 * t);
                assert!(
                    (v - 1.0).abs() <= envelope + 1e-6,
                    "ease outside decay envelope at t={t}: {v}"
                );
            }
        }
    }

    #[test]
    fn test_ease_out_elastic_converges_near_end() {
        // By t = 0.9 the ring-down amplitude is tiny.
        let v = ease_out_elastic(0.9);
        assert!((v - 1.0).abs() < 0.01, "unexpected late amplitude: {v}");
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        // Extrapolation beyond t = 1 is allowed.
        assert_eq!(lerp(0.0, 10.0, 1.2), 12.0);
    }
}
