/// Cubic ease-in-out on `t` in [0, 1]. Values outside that range are clamped.
///
/// Accelerates through the first half (`4t³`) and decelerates symmetrically
/// through the second (`1 - (-2t + 2)³ / 2`).
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.5), 1.0);
    }

    #[test]
    fn test_symmetric_and_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let y = ease_in_out_cubic(t);
            assert!(y >= prev, "not monotonic at t = {}", t);
            assert_relative_eq!(y, 1.0 - ease_in_out_cubic(1.0 - t), epsilon = 1e-12);
            prev = y;
        }
    }

    #[test]
    fn test_slow_start() {
        // A tenth of the way in, we've only covered 0.4% of the distance
        assert_relative_eq!(ease_in_out_cubic(0.1), 0.004, epsilon = 1e-12);
    }
}
