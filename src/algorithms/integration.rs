//! Trip integration over planar points
//!
//! Each step turns a pair of consecutive points into a 3D displacement and
//! classifies its vertical part as either ascent or descent, never both.
//! Totals are folded by replacement; callers keep the previous point and the
//! previous totals themselves.

use crate::core::{Displacement, PlanarCoordinates, TrackTotals};

/// Displacement from `previous` to `current`.
///
/// `distance_m` is the full 3D magnitude. A vertical change of exactly zero
/// takes the descent branch and is reported as zero descent.
pub fn delta(previous: PlanarCoordinates, current: PlanarCoordinates) -> Displacement {
    let step = current.to_vector3() - previous.to_vector3();
    let dz = step.z;

    let (meters_up, meters_down) = if dz > 0.0 {
        (dz, 0.0)
    } else {
        (0.0, dz.abs())
    };

    Displacement {
        distance_m: step.norm(),
        meters_up,
        meters_down,
    }
}

/// New totals with the step from `previous` to `current` added
pub fn accumulate(totals: TrackTotals, previous: PlanarCoordinates, current: PlanarCoordinates) -> TrackTotals {
    let step = delta(previous, current);

    TrackTotals {
        distance_m: totals.distance_m + step.distance_m,
        ascent_m: totals.ascent_m + step.meters_up,
        descent_m: totals.descent_m + step.meters_down,
    }
}

/// Fold a whole sequence of points, starting from zero totals.
///
/// The first point only establishes the starting position.
pub fn integrate_path(points: &[PlanarCoordinates]) -> TrackTotals {
    points
        .windows(2)
        .fold(TrackTotals::default(), |totals, pair| accumulate(totals, pair[0], pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_points_have_no_displacement() {
        let p = PlanarCoordinates::new(200147.07, 600072.37, 550.0);

        let step = delta(p, p);

        assert_eq!(step.distance_m, 0.0);
        assert_eq!(step.meters_up, 0.0);
        assert_eq!(step.meters_down, 0.0);
    }

    #[test]
    fn test_ascent_and_descent_classification() {
        let base = PlanarCoordinates::new(0.0, 0.0, 100.0);

        let up = delta(base, PlanarCoordinates::new(3.0, 0.0, 104.0));
        assert_eq!(up.distance_m, 5.0);
        assert_eq!(up.meters_up, 4.0);
        assert_eq!(up.meters_down, 0.0);

        let down = delta(base, PlanarCoordinates::new(0.0, 4.0, 97.0));
        assert_eq!(down.distance_m, 5.0);
        assert_eq!(down.meters_up, 0.0);
        assert_eq!(down.meters_down, 3.0);
    }

    #[test]
    fn test_flat_motion_counts_as_zero_descent() {
        let previous = PlanarCoordinates::new(10.0, 20.0, 500.0);
        let current = PlanarCoordinates::new(25.0, 20.0, 500.0);

        let step = delta(previous, current);

        assert_eq!(step.meters_down, 0.0);
        assert_eq!(step.meters_up, 0.0);
        assert_eq!(step.distance_m, 15.0);
    }

    #[test]
    fn test_accumulate_returns_new_totals() {
        let totals = TrackTotals::new(100.0, 20.0, 5.0);
        let previous = PlanarCoordinates::new(0.0, 0.0, 10.0);
        let current = PlanarCoordinates::new(0.0, 12.0, 15.0);

        let updated = accumulate(totals, previous, current);

        assert_eq!(updated, TrackTotals::new(113.0, 25.0, 5.0));
        assert_eq!(totals, TrackTotals::new(100.0, 20.0, 5.0));
    }

    #[test]
    fn test_integrate_path_over_hill() {
        let points = [
            PlanarCoordinates::new(0.0, 0.0, 0.0),
            PlanarCoordinates::new(0.0, 0.0, 30.0),
            PlanarCoordinates::new(40.0, 0.0, 30.0),
            PlanarCoordinates::new(40.0, 0.0, 10.0),
        ];

        let totals = integrate_path(&points);

        assert_eq!(totals.distance_m, 90.0);
        assert_eq!(totals.ascent_m, 30.0);
        assert_eq!(totals.descent_m, 20.0);
    }

    #[test]
    fn test_integrate_single_point_is_zero() {
        let totals = integrate_path(&[PlanarCoordinates::new(1.0, 2.0, 3.0)]);
        assert!(totals.is_zero());
        assert!(integrate_path(&[]).is_zero());
    }

    #[test]
    fn test_doubling_vertical_delta_doubles_ascent() {
        let base = PlanarCoordinates::new(150000.0, 650000.0, 800.0);
        let single = delta(base, PlanarCoordinates::new(base.x, base.y, base.z + 7.5));
        let double = delta(base, PlanarCoordinates::new(base.x, base.y, base.z + 15.0));

        assert!((double.meters_up - 2.0 * single.meters_up).abs() < 1e-9);
    }

    fn coordinate() -> impl Strategy<Value = PlanarCoordinates> {
        (-1.0e6..1.0e6f64, -1.0e6..1.0e6f64, -500.0..5000.0f64)
            .prop_map(|(x, y, z)| PlanarCoordinates::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_ascent_and_descent_are_exclusive(p1 in coordinate(), p2 in coordinate()) {
            let step = delta(p1, p2);
            prop_assert!(step.meters_up >= 0.0);
            prop_assert!(step.meters_down >= 0.0);
            prop_assert!(step.meters_up == 0.0 || step.meters_down == 0.0);
        }

        #[test]
        fn prop_distance_dominates_each_axis(p1 in coordinate(), p2 in coordinate()) {
            let step = delta(p1, p2);
            let largest = (p2.x - p1.x).abs()
                .max((p2.y - p1.y).abs())
                .max((p2.z - p1.z).abs());
            prop_assert!(step.distance_m >= largest * (1.0 - 1e-12));
        }

        #[test]
        fn prop_accumulation_equals_sum_of_steps(points in prop::collection::vec(coordinate(), 1..40)) {
            let totals = integrate_path(&points);

            let mut distance = 0.0;
            let mut ascent = 0.0;
            let mut descent = 0.0;
            let mut previous = TrackTotals::default();
            for pair in points.windows(2) {
                let step = delta(pair[0], pair[1]);
                distance += step.distance_m;
                ascent += step.meters_up;
                descent += step.meters_down;

                let next = accumulate(previous, pair[0], pair[1]);
                prop_assert!(next.distance_m >= previous.distance_m);
                prop_assert!(next.ascent_m >= previous.ascent_m);
                prop_assert!(next.descent_m >= previous.descent_m);
                previous = next;
            }

            prop_assert!((totals.distance_m - distance).abs() <= 1e-9 * distance.max(1.0));
            prop_assert!((totals.ascent_m - ascent).abs() <= 1e-9 * ascent.max(1.0));
            prop_assert!((totals.descent_m - descent).abs() <= 1e-9 * descent.max(1.0));
        }
    }
}
