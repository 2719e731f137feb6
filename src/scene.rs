use crate::{
    density::beta_pdf,
    ease::Ease,
    error::{BetamotionError, BetamotionResult},
    plot::{AxesSpec, AxisRange},
    timeline::{Script, Step},
};

/// The fixed scene variants this tool can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Vary alpha while beta stays fixed at 2.
    AdjustAlpha,
    /// Vary alpha and beta together.
    AdjustAlphaBeta,
}

impl SceneKind {
    pub fn all() -> [SceneKind; 2] {
        [SceneKind::AdjustAlpha, SceneKind::AdjustAlphaBeta]
    }

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::AdjustAlpha => "adjust-alpha",
            SceneKind::AdjustAlphaBeta => "adjust-alpha-beta",
        }
    }

    pub fn scene(self) -> Scene {
        match self {
            SceneKind::AdjustAlpha => adjust_alpha(),
            SceneKind::AdjustAlphaBeta => adjust_alpha_beta(),
        }
    }
}

/// How one density argument is supplied: from a tracker slot or as a literal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamBinding {
    Tracked(usize),
    Fixed(f64),
}

impl ParamBinding {
    fn resolve(self, values: &[f64]) -> f64 {
        match self {
            ParamBinding::Tracked(slot) => values.get(slot).copied().unwrap_or(0.0),
            ParamBinding::Fixed(v) => v,
        }
    }
}

/// One scripted presentation: axes, parameter bindings, and the timeline
/// script with its literal targets and durations.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Scene {
    pub kind: SceneKind,
    pub axes: AxesSpec,
    pub alpha: ParamBinding,
    pub beta: ParamBinding,
    pub script: Script,
}

impl Scene {
    pub fn validate(&self) -> BetamotionResult<()> {
        self.axes.validate()?;
        self.script.validate()?;
        for binding in [self.alpha, self.beta] {
            if let ParamBinding::Tracked(slot) = binding {
                if slot >= self.script.tracker_count() {
                    return Err(BetamotionError::validation(format!(
                        "parameter binding references tracker slot {slot}, but the script drives {}",
                        self.script.tracker_count()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Beta density at `x` for the current tracker values.
    pub fn density_at(&self, x: f64, values: &[f64]) -> f64 {
        beta_pdf(x, self.alpha.resolve(values), self.beta.resolve(values))
    }
}

fn adjust_alpha() -> Scene {
    Scene {
        kind: SceneKind::AdjustAlpha,
        axes: AxesSpec {
            x: AxisRange {
                min: 0.01,
                max: 0.99,
                tick: 0.01,
            },
            y: AxisRange {
                min: 0.0,
                max: 2.0,
                tick: 0.5,
            },
        },
        alpha: ParamBinding::Tracked(0),
        beta: ParamBinding::Fixed(2.0),
        script: Script {
            initial: vec![0.0],
            draw_on_secs: 1.0,
            draw_off_secs: 1.0,
            steps: vec![
                Step::Transition {
                    targets: vec![1.0],
                    duration_secs: 1.0,
                    ease: Ease::Smooth,
                },
                Step::Hold { duration_secs: 1.0 },
                Step::Transition {
                    targets: vec![10.0],
                    duration_secs: 1.5,
                    ease: Ease::Smooth,
                },
                Step::Hold { duration_secs: 1.0 },
                Step::Transition {
                    targets: vec![5.0],
                    duration_secs: 1.0,
                    ease: Ease::Smooth,
                },
            ],
        },
    }
}

fn adjust_alpha_beta() -> Scene {
    Scene {
        kind: SceneKind::AdjustAlphaBeta,
        axes: AxesSpec {
            x: AxisRange {
                min: 0.01,
                max: 0.99,
                tick: 0.1,
            },
            y: AxisRange {
                min: 0.0,
                max: 2.0,
                tick: 0.5,
            },
        },
        alpha: ParamBinding::Tracked(0),
        beta: ParamBinding::Tracked(1),
        script: Script {
            initial: vec![0.0, 0.0],
            draw_on_secs: 1.0,
            draw_off_secs: 1.0,
            steps: vec![
                Step::Transition {
                    targets: vec![3.0, 3.0],
                    duration_secs: 1.0,
                    ease: Ease::Smooth,
                },
                Step::Hold { duration_secs: 1.0 },
                Step::Transition {
                    targets: vec![3.0, 1.0],
                    duration_secs: 1.0,
                    ease: Ease::Smooth,
                },
                Step::Hold { duration_secs: 1.0 },
                Step::Transition {
                    targets: vec![1.0, 1.0],
                    duration_secs: 1.5,
                    ease: Ease::Smooth,
                },
                Step::Hold { duration_secs: 1.0 },
                Step::Transition {
                    targets: vec![0.1, 0.1],
                    duration_secs: 1.0,
                    ease: Ease::Smooth,
                },
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition_targets(script: &Script) -> Vec<Vec<f64>> {
        script
            .steps
            .iter()
            .filter_map(|s| match s {
                Step::Transition { targets, .. } => Some(targets.clone()),
                Step::Hold { .. } => None,
            })
            .collect()
    }

    #[test]
    fn both_scenes_validate() {
        for kind in SceneKind::all() {
            kind.scene().validate().unwrap();
        }
    }

    #[test]
    fn adjust_alpha_follows_the_scripted_targets() {
        let scene = SceneKind::AdjustAlpha.scene();
        assert_eq!(scene.script.initial, vec![0.0]);
        assert_eq!(
            transition_targets(&scene.script),
            vec![vec![1.0], vec![10.0], vec![5.0]]
        );
        assert_eq!(scene.beta, ParamBinding::Fixed(2.0));
    }

    #[test]
    fn adjust_alpha_beta_follows_the_paired_targets() {
        let scene = SceneKind::AdjustAlphaBeta.scene();
        assert_eq!(scene.script.initial, vec![0.0, 0.0]);
        assert_eq!(
            transition_targets(&scene.script),
            vec![
                vec![3.0, 3.0],
                vec![3.0, 1.0],
                vec![1.0, 1.0],
                vec![0.1, 0.1],
            ]
        );
    }

    #[test]
    fn density_resolves_fixed_and_tracked_bindings() {
        let scene = SceneKind::AdjustAlpha.scene();
        let v = scene.density_at(0.5, &[2.0]);
        assert!((v - crate::beta_pdf(0.5, 2.0, 2.0)).abs() < 1e-12);

        let scene = SceneKind::AdjustAlphaBeta.scene();
        let v = scene.density_at(0.25, &[3.0, 1.0]);
        assert!((v - crate::beta_pdf(0.25, 3.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_out_of_range_tracker_slot() {
        let mut scene = SceneKind::AdjustAlpha.scene();
        scene.alpha = ParamBinding::Tracked(3);
        assert!(scene.validate().is_err());
    }

    #[test]
    fn scene_names_round_trip() {
        for kind in SceneKind::all() {
            assert!(!kind.name().is_empty());
        }
        assert_ne!(
            SceneKind::AdjustAlpha.name(),
            SceneKind::AdjustAlphaBeta.name()
        );
    }
}
