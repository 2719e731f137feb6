use statrs::distribution::{Beta, Continuous};

/// Beta probability density at `x`, smoothed for rendering.
///
/// Invalid parameter domains (a shape parameter that is non-positive or
/// non-finite) and singular boundaries where the reference density is NaN or
/// infinite all yield exactly `0.0`, so a sampled curve never contains an
/// unplottable point. Pure and deterministic; never panics.
pub fn beta_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    let Ok(dist) = Beta::new(alpha, beta) else {
        return 0.0;
    };
    let v = dist.pdf(x);
    if v.is_finite() { v } else { 0.0 }
}
