use betamotion::{
    CurveState, Fps, FrameIndex, SceneKind, Timeline,
    timeline::{CurvePhase, Step},
};

fn fps10() -> Fps {
    Fps::new(10, 1).unwrap()
}

/// Last frame of every transition segment, with the values reached there.
fn transition_end_values(tl: &Timeline, script_steps: &[Step]) -> Vec<Vec<f64>> {
    let transition_count = script_steps
        .iter()
        .filter(|s| matches!(s, Step::Transition { .. }))
        .count();

    let mut out = Vec::new();
    for seg in tl.segments() {
        if seg.phase != CurvePhase::Steady || seg.from == seg.to {
            continue;
        }
        let last = FrameIndex(seg.range.end.0 - 1);
        out.push(tl.sample(last).unwrap().values);
    }
    assert_eq!(out.len(), transition_count);
    out
}

#[test]
fn adjust_alpha_tracker_sequence() {
    let scene = SceneKind::AdjustAlpha.scene();
    let tl = Timeline::compile(&scene.script, fps10()).unwrap();

    // Initial value while the curve draws on.
    assert_eq!(tl.sample(FrameIndex(0)).unwrap().values, vec![0.0]);

    // The tracker reaches exactly 1, then 10, then 5.
    assert_eq!(
        transition_end_values(&tl, &scene.script.steps),
        vec![vec![1.0], vec![10.0], vec![5.0]]
    );
}

#[test]
fn adjust_alpha_curve_created_first_and_removed_last() {
    let scene = SceneKind::AdjustAlpha.scene();
    let tl = Timeline::compile(&scene.script, fps10()).unwrap();
    let segs = tl.segments();

    assert_eq!(segs.first().unwrap().phase, CurvePhase::DrawOn);
    assert_eq!(segs.last().unwrap().phase, CurvePhase::DrawOff);
    for seg in &segs[1..segs.len() - 1] {
        assert_eq!(seg.phase, CurvePhase::Steady);
    }

    // Visibility states follow the lifecycle.
    assert!(matches!(
        tl.sample(FrameIndex(0)).unwrap().curve,
        CurveState::DrawOn(_)
    ));
    let mid = tl.duration().0 / 2;
    assert_eq!(tl.sample(FrameIndex(mid)).unwrap().curve, CurveState::Shown);
    let last = tl.duration().0 - 1;
    assert!(matches!(
        tl.sample(FrameIndex(last)).unwrap().curve,
        CurveState::DrawOff(_)
    ));
}

#[test]
fn adjust_alpha_beta_paired_target_sequence() {
    let scene = SceneKind::AdjustAlphaBeta.scene();
    let tl = Timeline::compile(&scene.script, fps10()).unwrap();

    assert_eq!(tl.sample(FrameIndex(0)).unwrap().values, vec![0.0, 0.0]);
    assert_eq!(
        transition_end_values(&tl, &scene.script.steps),
        vec![
            vec![3.0, 3.0],
            vec![3.0, 1.0],
            vec![1.0, 1.0],
            vec![0.1, 0.1],
        ]
    );
}

#[test]
fn paired_trackers_move_within_the_same_transition_window() {
    let scene = SceneKind::AdjustAlphaBeta.scene();
    let tl = Timeline::compile(&scene.script, fps10()).unwrap();

    // Second transition: alpha holds at 3 while beta moves 3 -> 1 under the
    // same clock, so alpha must stay pinned for the whole window.
    let seg = tl
        .segments()
        .iter()
        .find(|s| s.from == vec![3.0, 3.0] && s.to == vec![3.0, 1.0])
        .expect("second transition segment");
    for f in seg.range.start.0..seg.range.end.0 {
        let v = tl.sample(FrameIndex(f)).unwrap().values;
        assert_eq!(v[0], 3.0);
        assert!((1.0..=3.0).contains(&v[1]));
    }
}

#[test]
fn transitions_are_strictly_sequential() {
    for kind in SceneKind::all() {
        let scene = kind.scene();
        let tl = Timeline::compile(&scene.script, fps10()).unwrap();
        let segs = tl.segments();
        for w in segs.windows(2) {
            assert_eq!(w[0].range.end, w[1].range.start, "overlap in {kind:?}");
        }
        assert_eq!(segs.first().unwrap().range.start, FrameIndex(0));
        assert_eq!(segs.last().unwrap().range.end, tl.duration());
    }
}

#[test]
fn durations_follow_the_scripted_run_times() {
    // adjust-alpha at 10 fps: 1s on + 1s + 1s + 1.5s + 1s + 1s + 1s off.
    let scene = SceneKind::AdjustAlpha.scene();
    let tl = Timeline::compile(&scene.script, fps10()).unwrap();
    assert_eq!(tl.duration().0, 10 + 10 + 10 + 15 + 10 + 10 + 10);
}
