//! Calorie estimate for a training session.

/// MET value assumed for interval squat work
const SQUAT_MET: f64 = 5.0;

/// Post-exercise oxygen consumption adjustment applied on top of the MET cost
const EPOC_ADJUSTMENT: f64 = 1.05;

/// Estimate kilocalories burned over a session
///
/// Pure function of elapsed running time and body weight:
/// `round(T x (W / 3600) x 5 x 1.05)`. A missing or non-positive weight, or
/// an empty session, yields zero; there is no error path.
pub fn estimate_kcal(session_seconds: u32, weight_kg: f64) -> u32 {
    if session_seconds == 0 || !(weight_kg > 0.0) {
        return 0;
    }

    let kcal = session_seconds as f64 * (weight_kg / 3600.0) * SQUAT_MET * EPOC_ADJUSTMENT;
    kcal.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hour_at_sixty_kilos() {
        assert_eq!(estimate_kcal(3600, 60.0), 315);
    }

    #[test]
    fn test_zero_session_is_zero() {
        assert_eq!(estimate_kcal(0, 60.0), 0);
    }

    #[test]
    fn test_zero_weight_is_zero() {
        assert_eq!(estimate_kcal(600, 0.0), 0);
    }

    #[test]
    fn test_invalid_weight_is_zero() {
        assert_eq!(estimate_kcal(600, -70.0), 0);
        assert_eq!(estimate_kcal(600, f64::NAN), 0);
    }

    #[test]
    fn test_short_session_rounds() {
        // 150s x (60 / 3600) x 5 x 1.05 = 13.125
        assert_eq!(estimate_kcal(150, 60.0), 13);
    }
}
