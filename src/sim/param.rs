//! Declarative effect parameters
//!
//! Every emitter attribute is either a fixed value or a `[min, max]` range
//! that is sampled per emitted element.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A fixed value or an inclusive range sampled uniformly (integer-rounded)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Fixed(f32),
    Range(f32, f32),
}

impl Default for Param {
    fn default() -> Self {
        Param::Fixed(0.0)
    }
}

impl From<f32> for Param {
    fn from(v: f32) -> Self {
        Param::Fixed(v)
    }
}

impl From<[f32; 2]> for Param {
    fn from([min, max]: [f32; 2]) -> Self {
        Param::Range(min, max)
    }
}

impl Param {
    /// Reject non-finite values, inverted ranges and spans that overflow
    pub fn validate(&self, field: &'static str) -> Result<(), GameError> {
        match *self {
            Param::Fixed(v) if !v.is_finite() => Err(GameError::InvalidParam {
                field,
                reason: format!("non-finite value {}", v),
            }),
            Param::Range(min, max) if !min.is_finite() || !max.is_finite() => {
                Err(GameError::InvalidParam {
                    field,
                    reason: format!("non-finite range [{}, {}]", min, max),
                })
            }
            Param::Range(min, max) if min > max => Err(GameError::InvalidParam {
                field,
                reason: format!("inverted range [{}, {}]", min, max),
            }),
            Param::Range(min, max) if !(max - min).is_finite() => Err(GameError::InvalidParam {
                field,
                reason: format!("range [{}, {}] is too wide to sample", min, max),
            }),
            _ => Ok(()),
        }
    }

    /// Resolve to a concrete value: fixed passes through, ranges are sampled
    ///
    /// Sampled values are rounded to the nearest integer and kept inside the
    /// declared bounds (non-integer bounds clamp the rounded sample).
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> f32 {
        match *self {
            Param::Fixed(v) => v,
            Param::Range(min, max) => {
                if max <= min {
                    return min;
                }
                rng.random_range(min..=max).round().clamp(min, max)
            }
        }
    }

    /// Lower bound (the value itself when fixed)
    pub fn min(&self) -> f32 {
        match *self {
            Param::Fixed(v) => v,
            Param::Range(min, _) => min,
        }
    }

    /// Upper bound (the value itself when fixed)
    pub fn max(&self) -> f32 {
        match *self {
            Param::Fixed(v) => v,
            Param::Range(_, max) => max,
        }
    }
}
