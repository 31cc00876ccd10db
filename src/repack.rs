//! Per-slice conversion between half-complex packed spectra and explicit
//! complex pairs.
//!
//! The output buffer of a real forward transform is used directly as the
//! engine's work buffer: the packed spectrum is written one double past the
//! start of the slice, where its `re, im` pairs already line up with the
//! complex bins `1..`. Only the DC value has to be moved and the imaginary
//! slots without engine data have to be zeroed.
use crate::error::EngineError;
use crate::plan::{FftEngine, PlanGuard};

/// Number of complex bins stored for a real signal of length `n`.
///
/// # Example
/// ```
/// assert_eq!(ndbatchfft::rfft_len(8), 5);
/// assert_eq!(ndbatchfft::rfft_len(7), 4);
/// ```
#[must_use]
pub fn rfft_len(n: usize) -> usize {
    n / 2 + 1
}

/// Forward real transform of one slice.
///
/// * `x` - `n` real samples.
/// * `z` - `2 * (n / 2 + 1)` doubles, the interleaved complex output.
pub(crate) fn rfft_slice<E: FftEngine>(
    plan: &mut PlanGuard<'_, E>,
    x: &[f64],
    z: &mut [f64],
) -> Result<(), EngineError> {
    let n = x.len();
    debug_assert_eq!(z.len(), 2 * rfft_len(n));
    // Nyquist imaginary part; overwritten below for odd n
    if let Some(last) = z.last_mut() {
        *last = 0.;
    }
    let packed = &mut z[1..=n];
    packed.copy_from_slice(x);
    plan.forward(packed, 1.)?;
    z[0] = z[1];
    z[1] = 0.;
    Ok(())
}

/// Inverse real transform of one slice.
///
/// * `x` - `2 * l` doubles, `l` interleaved complex values.
/// * `z` - `l` doubles, the real output.
///
/// The imaginary part of the first complex value is skipped, the remaining
/// `l - 1` doubles are taken as the packed bins. Trailing input doubles
/// beyond that are ignored.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn irfft_slice<E: FftEngine>(
    plan: &mut PlanGuard<'_, E>,
    x: &[f64],
    z: &mut [f64],
) -> Result<(), EngineError> {
    let l = z.len();
    debug_assert_eq!(x.len(), 2 * l);
    z[0] = x[0];
    z[1..].copy_from_slice(&x[2..=l]);
    plan.backward(z, 1. / l as f64)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::RustFftEngine;
    use crate::plan::PlanFamily;

    #[test]
    fn test_rfft_slice_clears_dc_and_nyquist_imag() {
        let engine = RustFftEngine;
        let mut plan = PlanGuard::acquire(&engine, 6, PlanFamily::Real).unwrap();
        let x = [3., -1., 4., 1., -5., 9.];
        // garbage in the output must not leak through
        let mut z = [f64::NAN; 8];
        rfft_slice(&mut plan, &x, &mut z).unwrap();
        assert_eq!(z[1], 0.);
        assert_eq!(z[7], 0.);
        let dc: f64 = x.iter().sum();
        let nyquist: f64 = x.iter().enumerate().map(|(i, v)| if i % 2 == 0 { *v } else { -v }).sum();
        assert!((z[0] - dc).abs() < 1e-12);
        assert!((z[6] - nyquist).abs() < 1e-12);
    }

    #[test]
    fn test_rfft_slice_odd_length_keeps_last_imag() {
        let engine = RustFftEngine;
        let mut plan = PlanGuard::acquire(&engine, 3, PlanFamily::Real).unwrap();
        let x = [0., 1., 0.];
        let mut z = [0.; 4];
        rfft_slice(&mut plan, &x, &mut z).unwrap();
        // X1 = exp(-2 pi i / 3)
        let w = -2. * std::f64::consts::PI / 3.;
        let expected = [1., 0., w.cos(), w.sin()];
        for (a, b) in expected.iter().zip(z.iter()) {
            if (a - b).abs() > 1e-12 {
                panic!("Large difference of values, got {} expected {}.", b, a)
            }
        }
    }

    #[test]
    fn test_irfft_slice_drops_dc_imag() {
        let engine = RustFftEngine;
        let mut plan = PlanGuard::acquire(&engine, 4, PlanFamily::Real).unwrap();
        // (4, 7), (0, 0), (0, 0), (1, 1): DC imag and last pair beyond l - 1 are ignored
        let x = [4., 7., 0., 0., 0., 0., 1., 1.];
        let mut z = [0.; 4];
        irfft_slice(&mut plan, &x, &mut z).unwrap();
        for v in z {
            if (v - 1.).abs() > 1e-12 {
                panic!("Large difference of values, got {} expected {}.", v, 1.)
            }
        }
    }
}
