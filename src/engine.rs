//! Default transform engine built on `RustFFT` and `RealFFT`.
//!
//! The complex plan transforms interleaved doubles directly. The real plan
//! stores its spectrum in half-complex order; `RealFFT` works on explicit
//! `N/2+1` complex bins, so the plan converts between both on every call.
use crate::error::EngineError;
use crate::plan::{Direction, FftEngine, PlanFamily};
use num_complex::Complex64;
use num_traits::Zero;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Engine backed by `RustFFT` (complex) and `RealFFT` (real).
///
/// Each plan gets a fresh planner, nothing is cached between plans.
///
/// # Example
/// ```
/// use ndbatchfft::{FftEngine, PlanFamily, RustFftEngine};
///
/// let engine = RustFftEngine;
/// let mut plan = engine.make_plan(4, PlanFamily::Real).unwrap();
/// let mut buf = [1., 0., -1., 0.];
/// engine.forward(&mut plan, &mut buf, 1.0).unwrap();
/// // DC, re(X1), im(X1), Nyquist
/// for (a, b) in buf.iter().zip([0., 2., 0., 0.]) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// engine.destroy_plan(plan);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFftEngine;

/// Plan handed out by [`RustFftEngine`].
pub enum RustFftPlan {
    /// Complex-to-complex plan.
    Complex(ComplexPlan),
    /// Half-complex real plan.
    Real(RealPlan),
}

/// Forward and inverse complex FFTs of one length, with scratch space.
pub struct ComplexPlan {
    n: usize,
    plan_fwd: Arc<dyn Fft<f64>>,
    plan_bwd: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

/// Forward and inverse real FFTs of one length, with work buffers.
pub struct RealPlan {
    n: usize,
    plan_fwd: Arc<dyn RealToComplex<f64>>,
    plan_bwd: Arc<dyn ComplexToReal<f64>>,
    spectrum: Vec<Complex64>,
    signal: Vec<f64>,
    scratch: Vec<Complex64>,
}

impl ComplexPlan {
    #[allow(clippy::similar_names)]
    fn new(n: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let plan_fwd = planner.plan_fft_forward(n);
        let plan_bwd = planner.plan_fft_inverse(n);
        let scratch_len = plan_fwd
            .get_inplace_scratch_len()
            .max(plan_bwd.get_inplace_scratch_len());
        Self {
            n,
            plan_fwd,
            plan_bwd,
            scratch: vec![Complex64::zero(); scratch_len],
        }
    }

    fn process(&mut self, direction: Direction, buffer: &mut [f64], scale: f64) -> Result<(), EngineError> {
        assert_size(2 * self.n, buffer.len())?;
        let data: &mut [Complex64] = bytemuck::cast_slice_mut(buffer);
        let plan = match direction {
            Direction::Forward => &self.plan_fwd,
            Direction::Backward => &self.plan_bwd,
        };
        plan.process_with_scratch(data, &mut self.scratch);
        scale_by(buffer, scale);
        Ok(())
    }
}

impl RealPlan {
    #[allow(clippy::similar_names)]
    fn new(n: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let plan_fwd = planner.plan_fft_forward(n);
        let plan_bwd = planner.plan_fft_inverse(n);
        let scratch_len = plan_fwd
            .get_scratch_len()
            .max(plan_bwd.get_scratch_len());
        Self {
            n,
            spectrum: plan_fwd.make_output_vec(),
            signal: plan_fwd.make_input_vec(),
            scratch: vec![Complex64::zero(); scratch_len],
            plan_fwd,
            plan_bwd,
        }
    }

    fn forward(&mut self, buffer: &mut [f64], scale: f64) -> Result<(), EngineError> {
        assert_size(self.n, buffer.len())?;
        self.signal.copy_from_slice(buffer);
        self.plan_fwd
            .process_with_scratch(&mut self.signal, &mut self.spectrum, &mut self.scratch)?;
        pack_halfcomplex(&self.spectrum, buffer);
        scale_by(buffer, scale);
        Ok(())
    }

    fn backward(&mut self, buffer: &mut [f64], scale: f64) -> Result<(), EngineError> {
        assert_size(self.n, buffer.len())?;
        unpack_halfcomplex(buffer, &mut self.spectrum);
        self.plan_bwd
            .process_with_scratch(&mut self.spectrum, &mut self.signal, &mut self.scratch)?;
        buffer.copy_from_slice(&self.signal);
        scale_by(buffer, scale);
        Ok(())
    }
}

impl FftEngine for RustFftEngine {
    type Plan = RustFftPlan;

    fn make_plan(&self, length: usize, family: PlanFamily) -> Option<RustFftPlan> {
        // Buffers of 2 * length doubles must stay addressable.
        if length == 0 || length > isize::MAX as usize / (2 * std::mem::size_of::<Complex64>()) {
            return None;
        }
        Some(match family {
            PlanFamily::Complex => RustFftPlan::Complex(ComplexPlan::new(length)),
            PlanFamily::Real => RustFftPlan::Real(RealPlan::new(length)),
        })
    }

    fn forward(&self, plan: &mut RustFftPlan, buffer: &mut [f64], scale: f64) -> Result<(), EngineError> {
        match plan {
            RustFftPlan::Complex(p) => p.process(Direction::Forward, buffer, scale),
            RustFftPlan::Real(p) => p.forward(buffer, scale),
        }
    }

    fn backward(&self, plan: &mut RustFftPlan, buffer: &mut [f64], scale: f64) -> Result<(), EngineError> {
        match plan {
            RustFftPlan::Complex(p) => p.process(Direction::Backward, buffer, scale),
            RustFftPlan::Real(p) => p.backward(buffer, scale),
        }
    }

    fn destroy_plan(&self, plan: RustFftPlan) {
        drop(plan);
    }
}

impl RustFftPlan {
    /// Family this plan was built for.
    #[must_use]
    pub fn family(&self) -> PlanFamily {
        match self {
            Self::Complex(_) => PlanFamily::Complex,
            Self::Real(_) => PlanFamily::Real,
        }
    }
}

fn assert_size(expected: usize, got: usize) -> Result<(), EngineError> {
    if expected == got {
        Ok(())
    } else {
        Err(EngineError::BufferLength { expected, got })
    }
}

fn scale_by(buffer: &mut [f64], scale: f64) {
    if scale != 1.0 {
        for b in buffer.iter_mut() {
            *b *= scale;
        }
    }
}

/// Writes the `N/2+1` bins of `spectrum` into `packed` (length `N`) in
/// half-complex order. Imaginary parts of DC and, for even `N`, Nyquist are
/// dropped.
fn pack_halfcomplex(spectrum: &[Complex64], packed: &mut [f64]) {
    let n = packed.len();
    if n == 0 {
        return;
    }
    packed[0] = spectrum[0].re;
    for (k, pair) in packed[1..].chunks_mut(2).enumerate() {
        let bin = spectrum[k + 1];
        pair[0] = bin.re;
        if let Some(im) = pair.get_mut(1) {
            *im = bin.im;
        }
    }
}

/// Inverse of [`pack_halfcomplex`]; the dropped imaginary parts come back
/// as zero.
fn unpack_halfcomplex(packed: &[f64], spectrum: &mut [Complex64]) {
    let n = packed.len();
    if n == 0 {
        return;
    }
    spectrum[0] = Complex64::new(packed[0], 0.);
    for (k, pair) in packed[1..].chunks(2).enumerate() {
        spectrum[k + 1] = Complex64::new(pair[0], pair.get(1).copied().unwrap_or(0.));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_halfcomplex_layout_even_and_odd() {
        // even: DC, (re, im) x 2, Nyquist
        let spectrum = [
            Complex64::new(1., 0.),
            Complex64::new(2., 3.),
            Complex64::new(4., 5.),
            Complex64::new(6., 0.),
        ];
        let mut packed = [0.; 6];
        pack_halfcomplex(&spectrum, &mut packed);
        assert_eq!(packed, [1., 2., 3., 4., 5., 6.]);
        let mut back = [Complex64::zero(); 4];
        unpack_halfcomplex(&packed, &mut back);
        assert_eq!(back, spectrum);

        // odd: DC, (re, im) x 2
        let spectrum = [
            Complex64::new(1., 0.),
            Complex64::new(2., 3.),
            Complex64::new(4., 5.),
        ];
        let mut packed = [0.; 5];
        pack_halfcomplex(&spectrum, &mut packed);
        assert_eq!(packed, [1., 2., 3., 4., 5.]);
    }

    #[test]
    /// Successive forward and backward transform
    fn test_real_plan_inverts() {
        let engine = RustFftEngine;
        for n in [1, 2, 5, 6, 16] {
            let mut plan = engine.make_plan(n, PlanFamily::Real).unwrap();
            let expected: Vec<f64> = (0..n).map(|i| (i as f64).sin() + 0.5).collect();
            let mut buf = expected.clone();
            engine.forward(&mut plan, &mut buf, 1.0).unwrap();
            engine.backward(&mut plan, &mut buf, 1.0 / n as f64).unwrap();
            let dif = 1e-10;
            for (a, b) in expected.iter().zip(buf.iter()) {
                if (a - b).abs() > dif {
                    panic!("Large difference of values, got {} expected {}.", b, a)
                }
            }
            engine.destroy_plan(plan);
        }
    }

    #[test]
    fn test_complex_plan_matches_definition() {
        let engine = RustFftEngine;
        let mut plan = engine.make_plan(3, PlanFamily::Complex).unwrap();
        assert_eq!(plan.family(), PlanFamily::Complex);
        // x = (1, i, 0)
        let mut buf = [1., 0., 0., 1., 0., 0.];
        engine.forward(&mut plan, &mut buf, 2.0).unwrap();
        let w = -2. * std::f64::consts::PI / 3.;
        let expected = [
            Complex64::new(1., 1.),
            Complex64::new(1., 0.) + Complex64::i() * Complex64::from_polar(1., w),
            Complex64::new(1., 0.) + Complex64::i() * Complex64::from_polar(1., 2. * w),
        ];
        let got: &[Complex64] = bytemuck::cast_slice(&buf);
        let dif = 1e-12;
        for (a, b) in expected.iter().zip(got.iter()) {
            let a = *a * 2.;
            if (a - b).norm() > dif {
                panic!("Large difference of values, got {} expected {}.", b, a)
            }
        }
    }

    #[test]
    fn test_rejected_lengths_and_buffers() {
        let engine = RustFftEngine;
        assert!(engine.make_plan(0, PlanFamily::Complex).is_none());
        assert!(engine.make_plan(0, PlanFamily::Real).is_none());
        assert!(engine.make_plan(usize::MAX, PlanFamily::Real).is_none());

        let mut plan = engine.make_plan(4, PlanFamily::Complex).unwrap();
        let err = engine.forward(&mut plan, &mut [0.; 4], 1.0).unwrap_err();
        assert!(matches!(err, EngineError::BufferLength { expected: 8, got: 4 }));
    }
}
