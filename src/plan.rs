//! Engine seam and plan lifetime.
//!
//! A transform engine hands out plans for a given length and family.
//! [`PlanGuard`] owns one such plan for the duration of a single batched
//! operation and gives it back to the engine when dropped, so every exit
//! path of the batch loop, including an early error return, releases it
//! exactly once.
use crate::error::{AllocationError, EngineError};
use std::fmt;

/// Kind of transform a plan is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanFamily {
    /// Complex-to-complex transform on interleaved `re, im` doubles.
    Complex,
    /// Real transform on half-complex packed doubles.
    Real,
}

impl fmt::Display for PlanFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complex => write!(f, "complex"),
            Self::Real => write!(f, "real"),
        }
    }
}

/// Direction of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward transform, exponent sign -1.
    Forward,
    /// Backward transform, exponent sign +1.
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

/// A one-dimensional transform engine operating in place on flat `f64`
/// buffers.
///
/// Buffers of a [`PlanFamily::Complex`] plan hold `2 * length` doubles,
/// real and imaginary parts interleaved. Buffers of a [`PlanFamily::Real`]
/// plan hold `length` doubles in half-complex order: the DC value first,
/// then real and imaginary parts of the following bins, and for even
/// lengths the (real) Nyquist value last.
pub trait FftEngine {
    /// Opaque plan resource.
    type Plan;

    /// Builds a plan, or `None` if the engine cannot provide one for
    /// `length`.
    fn make_plan(&self, length: usize, family: PlanFamily) -> Option<Self::Plan>;

    /// Forward transform of `buffer` in place, multiplied by `scale`.
    ///
    /// # Errors
    /// Returns an [`EngineError`] if the transform could not be applied.
    fn forward(&self, plan: &mut Self::Plan, buffer: &mut [f64], scale: f64)
        -> Result<(), EngineError>;

    /// Backward transform of `buffer` in place, multiplied by `scale`.
    ///
    /// # Errors
    /// Returns an [`EngineError`] if the transform could not be applied.
    fn backward(
        &self,
        plan: &mut Self::Plan,
        buffer: &mut [f64],
        scale: f64,
    ) -> Result<(), EngineError>;

    /// Gives a plan back to the engine.
    fn destroy_plan(&self, plan: Self::Plan);
}

/// Scoped owner of a plan; releases it on drop.
pub struct PlanGuard<'e, E: FftEngine> {
    engine: &'e E,
    plan: Option<E::Plan>,
    length: usize,
    family: PlanFamily,
}

impl<'e, E: FftEngine> PlanGuard<'e, E> {
    /// Requests a plan of `family` for `length` from `engine`.
    ///
    /// # Errors
    /// [`AllocationError::Plan`] if `length` is zero or the engine refuses.
    /// Nothing needs to be released in that case.
    pub fn acquire(engine: &'e E, length: usize, family: PlanFamily) -> Result<Self, AllocationError> {
        let plan = if length == 0 {
            None
        } else {
            engine.make_plan(length, family)
        };
        match plan {
            Some(plan) => {
                log::debug!("acquired {} plan of length {}", family, length);
                Ok(Self {
                    engine,
                    plan: Some(plan),
                    length,
                    family,
                })
            }
            None => {
                log::warn!("engine could not build {} plan of length {}", family, length);
                Err(AllocationError::Plan { family, length })
            }
        }
    }

    /// Transform length of the held plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the plan has length zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Family of the held plan.
    #[must_use]
    pub fn family(&self) -> PlanFamily {
        self.family
    }

    /// Applies the held plan to `buffer` in `direction`.
    ///
    /// # Errors
    /// Whatever the engine reports.
    pub fn apply(
        &mut self,
        direction: Direction,
        buffer: &mut [f64],
        scale: f64,
    ) -> Result<(), EngineError> {
        let plan = self.plan.as_mut().ok_or(EngineError::Released)?;
        match direction {
            Direction::Forward => self.engine.forward(plan, buffer, scale),
            Direction::Backward => self.engine.backward(plan, buffer, scale),
        }
    }

    /// Forward transform with the held plan.
    ///
    /// # Errors
    /// Whatever the engine reports.
    pub fn forward(&mut self, buffer: &mut [f64], scale: f64) -> Result<(), EngineError> {
        self.apply(Direction::Forward, buffer, scale)
    }

    /// Backward transform with the held plan.
    ///
    /// # Errors
    /// Whatever the engine reports.
    pub fn backward(&mut self, buffer: &mut [f64], scale: f64) -> Result<(), EngineError> {
        self.apply(Direction::Backward, buffer, scale)
    }
}

impl<E: FftEngine> Drop for PlanGuard<'_, E> {
    fn drop(&mut self) {
        if let Some(plan) = self.plan.take() {
            self.engine.destroy_plan(plan);
            log::debug!("released {} plan of length {}", self.family, self.length);
        }
    }
}
