use crate::{
    core::{Fps, FrameIndex, FrameRange},
    ease::Ease,
    error::{BetamotionError, BetamotionResult},
    tracker::{Lerp, ValueTracker},
};

/// One leg of the scripted animation.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Move every tracker to its target over `duration_secs`, all under one
    /// shared clock.
    Transition {
        targets: Vec<f64>,
        duration_secs: f64,
        ease: Ease,
    },
    /// Keep the current values on screen.
    Hold { duration_secs: f64 },
}

/// A scene script: configuration data consumed sequentially by the timeline.
///
/// The curve is drawn on over `draw_on_secs` before the first step and drawn
/// off over `draw_off_secs` after the last one.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Script {
    pub initial: Vec<f64>,
    pub draw_on_secs: f64,
    pub draw_off_secs: f64,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn tracker_count(&self) -> usize {
        self.initial.len()
    }

    pub fn validate(&self) -> BetamotionResult<()> {
        if self.initial.is_empty() {
            return Err(BetamotionError::validation(
                "script must drive at least one tracker",
            ));
        }
        if !self.initial.iter().all(|v| v.is_finite()) {
            return Err(BetamotionError::validation(
                "initial tracker values must be finite",
            ));
        }
        for (name, secs) in [
            ("draw_on_secs", self.draw_on_secs),
            ("draw_off_secs", self.draw_off_secs),
        ] {
            if !(secs.is_finite() && secs > 0.0) {
                return Err(BetamotionError::validation(format!(
                    "{name} must be positive and finite"
                )));
            }
        }

        let mut transitions = 0usize;
        for step in &self.steps {
            match step {
                Step::Transition {
                    targets,
                    duration_secs,
                    ease: _,
                } => {
                    transitions += 1;
                    if targets.len() != self.initial.len() {
                        return Err(BetamotionError::validation(
                            "transition target count must match tracker count",
                        ));
                    }
                    if !targets.iter().all(|v| v.is_finite()) {
                        return Err(BetamotionError::validation(
                            "transition targets must be finite",
                        ));
                    }
                    if !(duration_secs.is_finite() && *duration_secs > 0.0) {
                        return Err(BetamotionError::validation(
                            "transition duration must be positive and finite",
                        ));
                    }
                }
                Step::Hold { duration_secs } => {
                    if !(duration_secs.is_finite() && *duration_secs > 0.0) {
                        return Err(BetamotionError::validation(
                            "hold duration must be positive and finite",
                        ));
                    }
                }
            }
        }

        if transitions == 0 {
            return Err(BetamotionError::validation(
                "script must contain at least one transition",
            ));
        }
        Ok(())
    }
}

/// Curve lifecycle phase a compiled segment belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvePhase {
    DrawOn,
    Steady,
    DrawOff,
}

/// One compiled phase of the timeline, pinned to a frame window.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Segment {
    pub range: FrameRange,
    pub from: Vec<f64>,
    pub to: Vec<f64>,
    pub ease: Ease,
    pub phase: CurvePhase,
}

/// Curve visibility at a sampled frame.
///
/// Draw progress runs 0..1; for `DrawOff` it is the fraction already removed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveState {
    DrawOn(f64),
    Shown,
    DrawOff(f64),
}

/// Tracker values and curve state at one frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TimelineState {
    pub frame: FrameIndex,
    pub values: Vec<f64>,
    pub curve: CurveState,
}

/// A script compiled against a frame rate.
///
/// Segments are strictly sequential and non-overlapping; every phase occupies
/// at least one frame. The last frame of a transition yields the literal
/// target values, so held frames show exact targets.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Timeline {
    fps: Fps,
    duration: FrameIndex,
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn compile(script: &Script, fps: Fps) -> BetamotionResult<Self> {
        script.validate()?;

        let mut segments: Vec<Segment> = Vec::with_capacity(script.steps.len() + 2);
        let mut cursor = 0u64;
        let mut current = script.initial.clone();

        let mut push = |from: Vec<f64>, to: Vec<f64>, secs: f64, ease: Ease, phase: CurvePhase| {
            let len = fps.secs_to_frames(secs).max(1);
            let range = FrameRange {
                start: FrameIndex(cursor),
                end: FrameIndex(cursor + len),
            };
            cursor += len;
            segments.push(Segment {
                range,
                from,
                to,
                ease,
                phase,
            });
        };

        push(
            current.clone(),
            current.clone(),
            script.draw_on_secs,
            Ease::Smooth,
            CurvePhase::DrawOn,
        );

        for step in &script.steps {
            match step {
                Step::Transition {
                    targets,
                    duration_secs,
                    ease,
                } => {
                    push(
                        current.clone(),
                        targets.clone(),
                        *duration_secs,
                        *ease,
                        CurvePhase::Steady,
                    );
                    current = targets.clone();
                }
                Step::Hold { duration_secs } => {
                    push(
                        current.clone(),
                        current.clone(),
                        *duration_secs,
                        Ease::Linear,
                        CurvePhase::Steady,
                    );
                }
            }
        }

        push(
            current.clone(),
            current,
            script.draw_off_secs,
            Ease::Smooth,
            CurvePhase::DrawOff,
        );

        Ok(Self {
            fps,
            duration: FrameIndex(cursor),
            segments,
        })
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Total frame count of the compiled timeline.
    pub fn duration(&self) -> FrameIndex {
        self.duration
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[tracing::instrument(skip(self))]
    pub fn sample(&self, frame: FrameIndex) -> BetamotionResult<TimelineState> {
        if frame.0 >= self.duration.0 {
            return Err(BetamotionError::evaluation("frame is out of bounds"));
        }
        let seg = self
            .segments
            .iter()
            .find(|s| s.range.contains(frame))
            .ok_or_else(|| BetamotionError::animation("no segment covers frame (bug)"))?;

        let len = seg.range.len_frames();
        let local = frame.0 - seg.range.start.0;
        let t = if len <= 1 {
            1.0
        } else {
            (local as f64) / ((len - 1) as f64)
        };
        let te = seg.ease.apply(t);

        // All trackers move in lockstep under the segment clock.
        let mut trackers: Vec<ValueTracker> =
            seg.from.iter().copied().map(ValueTracker::new).collect();
        for (tr, target) in trackers.iter_mut().zip(&seg.to) {
            let v = f64::lerp(&tr.get(), target, te);
            tr.set(v);
        }
        let values = trackers.iter().map(ValueTracker::get).collect();

        let curve = match seg.phase {
            CurvePhase::DrawOn => CurveState::DrawOn(te),
            CurvePhase::Steady => CurveState::Shown,
            CurvePhase::DrawOff => CurveState::DrawOff(te),
        };

        Ok(TimelineState {
            frame,
            values,
            curve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fps10() -> Fps {
        Fps::new(10, 1).unwrap()
    }

    fn one_tracker_script() -> Script {
        Script {
            initial: vec![0.0],
            draw_on_secs: 1.0,
            draw_off_secs: 1.0,
            steps: vec![
                Step::Transition {
                    targets: vec![4.0],
                    duration_secs: 1.0,
                    ease: Ease::Linear,
                },
                Step::Hold { duration_secs: 0.5 },
                Step::Transition {
                    targets: vec![1.0],
                    duration_secs: 1.0,
                    ease: Ease::Smooth,
                },
            ],
        }
    }

    #[test]
    fn segments_are_contiguous_and_cover_duration() {
        let tl = Timeline::compile(&one_tracker_script(), fps10()).unwrap();
        let segs = tl.segments();
        assert_eq!(segs.len(), 5);
        assert_eq!(segs[0].range.start.0, 0);
        for w in segs.windows(2) {
            assert_eq!(w[0].range.end, w[1].range.start);
        }
        assert_eq!(segs.last().unwrap().range.end, tl.duration());
        assert_eq!(tl.duration().0, 10 + 10 + 5 + 10 + 10);
    }

    #[test]
    fn transition_endpoints_are_exact() {
        let tl = Timeline::compile(&one_tracker_script(), fps10()).unwrap();
        // First transition occupies [10, 20); its last frame holds the target.
        assert_eq!(tl.sample(FrameIndex(10)).unwrap().values, vec![0.0]);
        assert_eq!(tl.sample(FrameIndex(19)).unwrap().values, vec![4.0]);
        // Hold keeps the reached value.
        assert_eq!(tl.sample(FrameIndex(22)).unwrap().values, vec![4.0]);
        // Second transition ends at 1.0 exactly.
        assert_eq!(tl.sample(FrameIndex(34)).unwrap().values, vec![1.0]);
    }

    #[test]
    fn curve_lifecycle_brackets_the_steps() {
        let tl = Timeline::compile(&one_tracker_script(), fps10()).unwrap();
        assert_eq!(tl.sample(FrameIndex(0)).unwrap().curve, CurveState::DrawOn(0.0));
        assert!(matches!(
            tl.sample(FrameIndex(5)).unwrap().curve,
            CurveState::DrawOn(p) if p > 0.0 && p < 1.0
        ));
        assert_eq!(tl.sample(FrameIndex(15)).unwrap().curve, CurveState::Shown);
        let last = tl.duration().0 - 1;
        assert_eq!(
            tl.sample(FrameIndex(last)).unwrap().curve,
            CurveState::DrawOff(1.0)
        );
    }

    #[test]
    fn lockstep_pair_shares_one_clock() {
        let script = Script {
            initial: vec![0.0, 0.0],
            draw_on_secs: 1.0,
            draw_off_secs: 1.0,
            steps: vec![Step::Transition {
                targets: vec![4.0, 8.0],
                duration_secs: 1.0,
                ease: Ease::Linear,
            }],
        };
        let tl = Timeline::compile(&script, fps10()).unwrap();
        for f in 10..20 {
            let v = tl.sample(FrameIndex(f)).unwrap().values;
            assert!((v[0] * 2.0 - v[1]).abs() < 1e-12, "desynced at frame {f}");
        }
    }

    #[test]
    fn sampling_past_the_end_is_an_error() {
        let tl = Timeline::compile(&one_tracker_script(), fps10()).unwrap();
        assert!(tl.sample(tl.duration()).is_err());
    }

    #[test]
    fn sub_frame_phases_still_get_one_frame() {
        let script = Script {
            initial: vec![0.0],
            draw_on_secs: 0.01,
            draw_off_secs: 0.01,
            steps: vec![Step::Transition {
                targets: vec![1.0],
                duration_secs: 0.01,
                ease: Ease::Linear,
            }],
        };
        let tl = Timeline::compile(&script, fps10()).unwrap();
        assert_eq!(tl.duration().0, 3);
        // A one-frame transition lands on its target immediately.
        assert_eq!(tl.sample(FrameIndex(1)).unwrap().values, vec![1.0]);
    }

    #[test]
    fn validate_rejects_bad_scripts() {
        let mut s = one_tracker_script();
        s.initial.clear();
        assert!(s.validate().is_err());

        let mut s = one_tracker_script();
        s.steps = vec![Step::Hold { duration_secs: 1.0 }];
        assert!(s.validate().is_err());

        let mut s = one_tracker_script();
        s.steps[0] = Step::Transition {
            targets: vec![1.0, 2.0],
            duration_secs: 1.0,
            ease: Ease::Linear,
        };
        assert!(s.validate().is_err());

        let mut s = one_tracker_script();
        s.draw_on_secs = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn timeline_serializes_for_dump() {
        let tl = Timeline::compile(&one_tracker_script(), fps10()).unwrap();
        let json = serde_json::to_string(&tl).unwrap();
        assert!(json.contains("\"segments\""));
    }
}
