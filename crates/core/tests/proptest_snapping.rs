//! Property-based tests for grid snapping
//!
//! Validates snapping invariants:
//! - Snapping an already snapped coordinate is a no-op
//! - Snapped coordinates land on integers (odd spans) or half-integers (even spans)
//! - A snapped coordinate is never more than half a cell from the input

use byldr_core::{snap_axis, snap_to_grid, Footprint, Rotation};
use proptest::prelude::*;

proptest! {
    /// Property: snap(snap(x)) == snap(x)
    #[test]
    fn snapping_is_idempotent(coord in -500.0f32..500.0, cells in 1u32..6) {
        let once = snap_axis(coord, cells);
        let twice = snap_axis(once, cells);
        prop_assert_eq!(once, twice);
    }

    /// Property: parity decides whether the centre is integral or half-integral
    #[test]
    fn parity_decides_centre_offset(coord in -500.0f32..500.0, cells in 1u32..6) {
        let snapped = snap_axis(coord, cells);
        let frac = snapped - snapped.floor();
        if cells % 2 == 1 {
            prop_assert_eq!(frac, 0.0);
        } else {
            prop_assert_eq!(frac, 0.5);
        }
    }

    /// Property: snapping moves a coordinate by at most half a cell
    #[test]
    fn snapping_stays_within_half_a_cell(coord in -500.0f32..500.0, cells in 1u32..6) {
        let snapped = snap_axis(coord, cells);
        prop_assert!((snapped - coord).abs() <= 0.5 + 1e-3);
    }

    /// Property: a rotated footprint snaps with its swapped parity
    #[test]
    fn rotated_footprint_uses_swapped_axes(
        x in -100.0f32..100.0,
        z in -100.0f32..100.0,
        w in 1u32..5,
        l in 1u32..5,
    ) {
        let footprint = Footprint::new(w, l);
        let rotated = footprint.rotated(Rotation::Deg90);
        let (rx, rz) = snap_to_grid(x, z, rotated);
        prop_assert_eq!(rx, snap_axis(x, l));
        prop_assert_eq!(rz, snap_axis(z, w));
    }
}
