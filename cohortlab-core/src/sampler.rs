//! Synthetic sample generator.
//!
//! Draws `n` values from Normal(mean, sd) and floors each at zero, since
//! expression percentages and ratios cannot be negative. Values are not
//! renormalised after clamping: when `mean` is small relative to `sd` the
//! empirical mean drifts above the configured one. That drift is an accepted
//! approximation of the synthetic data, not something callers should correct.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::domain::CohortParams;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },
}

impl SampleError {
    fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        SampleError::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }
}

/// Check generator inputs at the boundary.
pub fn validate(params: CohortParams, n: usize) -> Result<(), SampleError> {
    if !params.mean.is_finite() {
        return Err(SampleError::invalid("mean", format!("must be finite, got {}", params.mean)));
    }
    if !params.sd.is_finite() {
        return Err(SampleError::invalid("sd", format!("must be finite, got {}", params.sd)));
    }
    if params.sd < 0.0 {
        return Err(SampleError::invalid("sd", format!("must be >= 0, got {}", params.sd)));
    }
    if n == 0 {
        return Err(SampleError::invalid("n", "must be > 0"));
    }
    Ok(())
}

/// Draw `n` clamped values using a caller-owned generator.
pub fn generate<R: Rng + ?Sized>(
    params: CohortParams,
    n: usize,
    rng: &mut R,
) -> Result<Vec<f64>, SampleError> {
    validate(params, n)?;
    let normal = Normal::new(params.mean, params.sd)
        .map_err(|e| SampleError::invalid("sd", e.to_string()))?;
    Ok((0..n).map(|_| normal.sample(rng).max(0.0)).collect())
}

/// Draw `n` clamped values from a generator freshly seeded with `seed`.
///
/// Identical `(mean, sd, n, seed)` always yields the identical sequence.
pub fn generate_seeded(mean: f64, sd: f64, n: usize, seed: u64) -> Result<Vec<f64>, SampleError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(CohortParams::new(mean, sd), n, &mut rng)
}
