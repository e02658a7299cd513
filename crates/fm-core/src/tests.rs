//! Unit tests for fm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ApId, DeviceId, ServerId};

    #[test]
    fn index_roundtrip() {
        let id = DeviceId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DeviceId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering_follows_roster_position() {
        assert!(ServerId(0) < ServerId(1));
        assert!(ApId(100) > ApId(99));
    }

    #[test]
    fn display() {
        assert_eq!(ServerId(7).to_string(), "ServerId(7)");
    }
}

#[cfg(test)]
mod geo {
    use proptest::prelude::*;

    use crate::{Coordinate, angle_between_deg, normalize_deg};

    #[test]
    fn zero_distance_to_self() {
        let p = Coordinate::new(3.5, -7.25);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn bearing_cardinal_directions() {
        let o = Coordinate::ORIGIN;
        assert_eq!(o.bearing_to(Coordinate::new(1.0, 0.0)), Some(0.0));
        assert!((o.bearing_to(Coordinate::new(0.0, 1.0)).unwrap() - 90.0).abs() < 1e-9);
        assert!((o.bearing_to(Coordinate::new(-1.0, 0.0)).unwrap() - 180.0).abs() < 1e-9);
        assert!((o.bearing_to(Coordinate::new(0.0, -1.0)).unwrap() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_undefined_for_coincident_points() {
        let p = Coordinate::new(1.0, 1.0);
        assert_eq!(p.bearing_to(p), None);
    }

    #[test]
    fn advance_moves_along_heading() {
        let p = Coordinate::ORIGIN.advance(90.0, 2.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_wraps_negative_and_large() {
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(720.0), 0.0);
        assert_eq!(normalize_deg(359.5), 359.5);
    }

    #[test]
    fn angle_between_takes_short_way_round() {
        assert_eq!(angle_between_deg(350.0, 10.0), 20.0);
        assert_eq!(angle_between_deg(10.0, 350.0), 20.0);
        assert_eq!(angle_between_deg(0.0, 180.0), 180.0);
    }

    fn coord() -> impl Strategy<Value = Coordinate> {
        (-1.0e6..1.0e6f64, -1.0e6..1.0e6f64).prop_map(|(x, y)| Coordinate::new(x, y))
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coord(), b in coord()) {
            prop_assert_eq!(a.distance(b), b.distance(a));
        }

        #[test]
        fn distance_to_self_is_zero(a in coord()) {
            prop_assert_eq!(a.distance(a), 0.0);
        }

        #[test]
        fn angle_between_is_bounded(a in -720.0..720.0f64, b in -720.0..720.0f64) {
            let d = angle_between_deg(a, b);
            prop_assert!((0.0..=180.0).contains(&d));
        }
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn clock_starts_at_zero() {
        let c = SimClock::new(500);
        assert_eq!(c.current_tick, Tick::ZERO);
        assert_eq!(c.now_secs(), 0.0);
    }

    #[test]
    fn clock_advances_in_tick_units() {
        let mut c = SimClock::new(500);
        c.advance();
        c.advance();
        c.advance();
        assert_eq!(c.current_tick, Tick(3));
        assert!((c.now_secs() - 1.5).abs() < 1e-12);
        assert!((c.tick_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn config_end_tick() {
        let cfg = SimConfig { tick_duration_ms: 1_000, total_ticks: 10, seed: 1 };
        assert_eq!(cfg.end_tick(), Tick(10));
        assert_eq!(cfg.make_clock().tick_duration_ms, 1_000);
    }
}

#[cfg(test)]
mod error {
    use crate::{CoreError, ensure_finite};

    #[test]
    fn finite_values_pass() {
        assert_eq!(ensure_finite("speed", 3.0).unwrap(), 3.0);
    }

    #[test]
    fn nan_rejected() {
        let err = ensure_finite("speed", f64::NAN).unwrap_err();
        assert!(matches!(err, CoreError::NonFinite { what: "speed", .. }));
    }
}
