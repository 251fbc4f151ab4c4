//! Four-lane stepping
//!
//! Every lane of a packed value must behave exactly like the scalar version
//! of the same integrator, even when lanes sit in different situations
//! (moving in opposite directions, already arrived, far away).

use recoil_spring::{
    double4, float4, spring_elastic, spring_precise, spring_simple,
    spring_simple_double_smoothing, spring_simple_duration_limit,
    spring_simple_velocity_smoothing, Double4, Float4, IntermediateState, SpringParams,
    SpringState, SpringValue,
};

const DT: f64 = 1.0 / 60.0;

fn starts() -> (Double4, Double4, Double4) {
    let position = double4(0.0, 5.0, -3.0, 10.0);
    let velocity = double4(0.0, -2.0, 4.0, 0.0);
    let target = double4(10.0, -5.0, 7.5, 10.0);
    (position, velocity, target)
}

fn to_f32(v: Double4) -> Float4 {
    float4(v[0] as f32, v[1] as f32, v[2] as f32, v[3] as f32)
}

fn assert_lanes_close(packed: Float4, reference: Double4, tolerance: f64, context: &str) {
    for lane in 0..4 {
        let diff = (packed[lane] as f64 - reference[lane]).abs();
        assert!(
            diff <= tolerance * (1.0 + reference[lane].abs()),
            "{context} lane {lane}: {} vs {}",
            packed[lane],
            reference[lane]
        );
    }
}

#[test]
fn test_double_lanes_match_scalar_bit_for_bit() {
    let (position, velocity, target) = starts();
    let packed = SpringState::new(position, velocity);

    for zeta in [0.3, 1.0, 2.0] {
        let params = SpringParams::new_unchecked(8.0, zeta, 1e-5);
        let elastic = spring_elastic(DT, packed, target, Double4::splat(0.0), params);
        let precise = spring_precise(DT, packed, target, Double4::splat(0.0), params);
        let simple = spring_simple(DT, packed, target, 8.0);

        for lane in 0..4 {
            let scalar = SpringState::new(position[lane], velocity[lane]);
            let e = spring_elastic(DT, scalar, target[lane], 0.0, params);
            let p = spring_precise(DT, scalar, target[lane], 0.0, params);
            let s = spring_simple(DT, scalar, target[lane], 8.0);
            assert_eq!(elastic.position.lane(lane), e.position);
            assert_eq!(elastic.velocity.lane(lane), e.velocity);
            assert_eq!(precise.position.lane(lane), p.position);
            assert_eq!(precise.velocity.lane(lane), p.velocity);
            assert_eq!(simple.position.lane(lane), s.position);
            assert_eq!(simple.velocity.lane(lane), s.velocity);
        }
    }
}

#[test]
fn test_variant_lanes_take_independent_paths() {
    let (position, velocity, target) = starts();
    let mut packed = SpringState::new(position, velocity);
    let mut packed_inner = IntermediateState::from_state(packed);

    let mut scalars: Vec<_> = (0..4)
        .map(|lane| {
            let state = SpringState::new(position[lane], velocity[lane]);
            (state, IntermediateState::from_state(state))
        })
        .collect();

    for _ in 0..120 {
        (packed, packed_inner) = spring_simple_velocity_smoothing(
            DT,
            packed,
            packed_inner,
            target,
            6.0,
            2.0,
            8.0,
        );
        for (lane, (state, inner)) in scalars.iter_mut().enumerate() {
            (*state, *inner) = spring_simple_velocity_smoothing(
                DT,
                *state,
                *inner,
                target[lane],
                6.0,
                2.0,
                8.0,
            );
        }
    }

    for (lane, (state, inner)) in scalars.iter().enumerate() {
        assert_eq!(packed.position[lane], state.position);
        assert_eq!(packed.velocity[lane], state.velocity);
        assert_eq!(packed_inner.position[lane], inner.position);
        assert_eq!(packed_inner.velocity[lane], inner.velocity);
    }
    // The lane that started on its target never moved.
    assert_eq!(packed.position[3], 10.0);
    // Lanes heading down and up walked in opposite directions.
    assert!(packed_inner.position[1] < 5.0);
    assert!(packed_inner.position[2] > -3.0);
}

#[test]
fn test_float4_tracks_double_reference() {
    let (position, velocity, target) = starts();
    let params64 = SpringParams::new_unchecked(8.0, 0.6, 1e-5);
    let params32 = SpringParams::new_unchecked(8.0f32, 0.6, 1e-5);

    let mut wide = SpringState::new(position, velocity);
    let mut narrow = SpringState::new(to_f32(position), to_f32(velocity));
    for _ in 0..60 {
        wide = spring_elastic(DT, wide, target, Double4::splat(0.0), params64);
        narrow = spring_elastic(DT as f32, narrow, to_f32(target), Float4::splat(0.0), params32);
    }
    assert_lanes_close(narrow.position, wide.position, 1e-4, "elastic position");

    let mut wide = SpringState::new(position, velocity);
    let mut narrow = SpringState::new(to_f32(position), to_f32(velocity));
    for _ in 0..60 {
        wide = spring_precise(DT, wide, target, Double4::splat(0.0), params64);
        narrow = spring_precise(DT as f32, narrow, to_f32(target), Float4::splat(0.0), params32);
    }
    assert_lanes_close(narrow.position, wide.position, 1e-4, "precise position");
}

#[test]
fn test_float4_smoothing_variants() {
    let (position, velocity, target) = starts();
    let target32 = to_f32(target);

    let mut wide = SpringState::new(position, velocity);
    let mut wide_inner = IntermediateState::from_state(wide);
    let mut narrow = SpringState::new(to_f32(position), to_f32(velocity));
    let mut narrow_inner = IntermediateState::from_state(narrow);
    let mut remaining = 0.5;

    for _ in 0..45 {
        (wide, wide_inner) =
            spring_simple_duration_limit(DT, wide, wide_inner, target, remaining, 2.0, 12.0);
        (narrow, narrow_inner) = spring_simple_duration_limit(
            DT as f32,
            narrow,
            narrow_inner,
            target32,
            remaining as f32,
            2.0,
            12.0,
        );
        remaining = (remaining - DT).max(0.0);
    }
    assert_lanes_close(narrow.position, wide.position, 1e-4, "duration limit");
    assert_lanes_close(narrow_inner.position, target, 1e-4, "duration limit arrival");

    let mut wide = SpringState::new(position, velocity);
    let mut wide_inner = IntermediateState::from_state(wide);
    let mut narrow = SpringState::new(to_f32(position), to_f32(velocity));
    let mut narrow_inner = IntermediateState::from_state(narrow);
    for _ in 0..90 {
        (wide, wide_inner) =
            spring_simple_double_smoothing(DT, wide, wide_inner, target, 6.0);
        (narrow, narrow_inner) =
            spring_simple_double_smoothing(DT as f32, narrow, narrow_inner, target32, 6.0);
    }
    assert_lanes_close(narrow.position, wide.position, 1e-4, "double smoothing");
}
