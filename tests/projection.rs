// Slope projector invariants exercised through the public API.
// Scenario values mirror the prototype's reference track.

use ski_patrol::slope::projection::{Bounds, SlopeTrack};

fn reference_track() -> SlopeTrack {
    SlopeTrack {
        center_x: 300.0,
        top_y: 50.0,
        bottom_y: 500.0,
        top_width: 100.0,
        bottom_width: 400.0,
    }
}

#[test]
fn depths_above_the_top_edge_behave_like_the_top_edge() {
    let track = reference_track();
    assert_eq!(track.bounds_at_depth(10.0), track.bounds_at_depth(50.0));
}

#[test]
fn depths_below_the_bottom_edge_behave_like_the_bottom_edge() {
    let track = reference_track();
    assert_eq!(track.bounds_at_depth(720.0), track.bounds_at_depth(500.0));
}

#[test]
fn midpoint_bounds_match_the_reference_values() {
    let track = reference_track();
    let bounds = track.bounds_at_depth(275.0);
    assert!((track.width_at_depth(275.0) - 250.0).abs() < 1e-9);
    assert!((bounds.left_x - 175.0).abs() < 1e-9);
    assert!((bounds.right_x - 425.0).abs() < 1e-9);
}

#[test]
fn clamping_against_the_midpoint_bounds() {
    let track = reference_track();
    let bounds = track.bounds_at_depth(275.0);
    assert!((bounds.clamp_span(175.0, 40.0) - 195.0).abs() < 1e-9);
    assert_eq!(bounds.clamp_span(300.0, 40.0), 300.0);
}

#[test]
fn clamping_twice_equals_clamping_once() {
    let bounds = Bounds {
        left_x: 175.0,
        right_x: 425.0,
    };
    for x in (-100..700).step_by(13) {
        let once = bounds.clamp_span(x as f64, 40.0);
        assert_eq!(bounds.clamp_span(once, 40.0), once);
    }
}

#[test]
fn bounds_never_invert_across_a_sweep_of_tracks() {
    for (tw, bw) in [(1.0, 1.0), (10.0, 400.0), (400.0, 10.0), (0.5, 900.0)] {
        let track = SlopeTrack {
            center_x: 320.0,
            top_y: 40.0,
            bottom_y: 480.0,
            top_width: tw,
            bottom_width: bw,
        };
        for i in 0..=100 {
            let y = i as f64 * 6.0;
            let b = track.bounds_at_depth(y);
            assert!(b.left_x <= b.right_x, "tw={tw} bw={bw} y={y}");
        }
    }
}
