//! # ndbatchfft: batched FFTs along the last axis of *n*-dimensional arrays
//!
//! This library applies one-dimensional complex-to-complex and
//! real-to-complex FFTs to every lane along the last axis of an ndarray.
//! All leading axes are treated as a batch; the lanes are transformed one
//! after another with a single plan.
//!
//! Inputs of any supported element type and memory layout are accepted.
//! They are coerced to `f64` or `Complex<f64>` and brought into standard
//! layout first, copying only if necessary. The result is always a new
//! array.
//!
//! | function  | input    | output   | last axis  |
//! |-----------|----------|----------|------------|
//! | [`cfft`]  | complex  | complex  | *n*        |
//! | [`icfft`] | complex  | complex  | *n*        |
//! | [`rfft`]  | real     | complex  | *n/2+1*    |
//! | [`irfft`] | complex  | real     | *n*        |
//!
//! [`irfft`] keeps the length of the last axis: an input of *l* complex
//! values gives *l* real values. To invert [`rfft`] of a signal of length
//! *n*, zero-pad its *n/2+1* bins to *n* first.
//!
//! The transforms are computed by an [`FftEngine`]. The plain functions use
//! [`RustFftEngine`] (`RustFFT` and `RealFFT`), the `*_with` variants take
//! any engine.
//!
//! ## Example
//! Real-to-complex fft of three signals of length 8
//! ```
//! use ndarray::{Array, Dim, Ix};
//! use ndbatchfft::rfft;
//!
//! let (nx, ny) = (3, 8);
//! let mut data = Array::<f64, Dim<[Ix; 2]>>::zeros((nx, ny));
//! for (i, v) in data.iter_mut().enumerate() {
//!     *v = i as f64;
//! }
//! let vhat = rfft(&data).unwrap();
//! assert_eq!(vhat.shape(), &[nx, ny / 2 + 1]);
//! assert_eq!(vhat[[0, 0]].im, 0.);
//! ```
#![warn(missing_docs)]
extern crate ndarray;
extern crate rustfft;
mod engine;
mod error;
pub mod normalize;
mod plan;
mod repack;

pub use engine::{ComplexPlan, RealPlan, RustFftEngine, RustFftPlan};
pub use error::{AllocationError, EngineError, Result};
pub use normalize::{Element, RealElement};
pub use num_complex::{Complex, Complex64};
pub use plan::{Direction, FftEngine, PlanFamily, PlanGuard};
pub use repack::rfft_len;

use ndarray::{Array, ArrayBase, Data, Dimension};

const STANDARD_LAYOUT: &str = "normalized arrays are in standard layout";

/// Declares a public transform together with its `*_with` variant taking an
/// explicit engine. The plain function runs on [`RustFftEngine`].
macro_rules! create_transform {
    (
        $(#[$meta: meta])* $i: ident,
        $(#[$meta_with: meta])* $iw: ident,
        $bound: ident, $out: ty, $imp: ident $(, $arg: expr)*
    ) => {
        $(#[$meta])*
        pub fn $i<S, D>(x: &ArrayBase<S, D>) -> Result<Array<$out, D>>
        where
            S: Data,
            S::Elem: $bound,
            D: Dimension,
        {
            $iw(&RustFftEngine, x)
        }

        $(#[$meta_with])*
        pub fn $iw<E, S, D>(engine: &E, x: &ArrayBase<S, D>) -> Result<Array<$out, D>>
        where
            E: FftEngine,
            S: Data,
            S::Elem: $bound,
            D: Dimension,
        {
            $imp(engine, x $(, $arg)*)
        }
    };
}

fn last_axis_len<S: Data, D: Dimension>(x: &ArrayBase<S, D>) -> usize {
    x.shape().last().copied().unwrap_or(0)
}

fn transform_failed<E: FftEngine>(
    plan: &PlanGuard<'_, E>,
    slice: usize,
    source: EngineError,
) -> AllocationError {
    log::warn!(
        "{} transform of length {} failed on slice {}: {}",
        plan.family(),
        plan.len(),
        slice,
        source
    );
    AllocationError::Transform {
        family: plan.family(),
        length: plan.len(),
        slice,
        source,
    }
}

#[allow(clippy::cast_precision_loss)]
fn complex_transform<E, S, D>(
    engine: &E,
    x: &ArrayBase<S, D>,
    direction: Direction,
) -> Result<Array<Complex64, D>>
where
    E: FftEngine,
    S: Data,
    S::Elem: Element,
    D: Dimension,
{
    let x = normalize::to_complex(x);
    let n = last_axis_len(&x);
    let mut plan = PlanGuard::acquire(engine, n, PlanFamily::Complex)?;
    let mut z = Array::<Complex64, D>::zeros(x.raw_dim());
    let scale = match direction {
        Direction::Forward => 1.,
        Direction::Backward => 1. / n as f64,
    };
    log::debug!("{} complex fft: {} slices of length {}", direction, x.len() / n, n);

    let input = x.as_slice().expect(STANDARD_LAYOUT);
    let output = z.as_slice_mut().expect(STANDARD_LAYOUT);
    for (slice, (src, dst)) in input
        .chunks_exact(n)
        .zip(output.chunks_exact_mut(n))
        .enumerate()
    {
        dst.copy_from_slice(src);
        plan.apply(direction, bytemuck::cast_slice_mut(dst), scale)
            .map_err(|source| transform_failed(&plan, slice, source))?;
    }
    Ok(z)
}

fn real_forward<E, S, D>(engine: &E, x: &ArrayBase<S, D>) -> Result<Array<Complex64, D>>
where
    E: FftEngine,
    S: Data,
    S::Elem: RealElement,
    D: Dimension,
{
    let x = normalize::to_real(x);
    let n = last_axis_len(&x);
    let mut plan = PlanGuard::acquire(engine, n, PlanFamily::Real)?;
    let m = rfft_len(n);
    let mut shape = x.raw_dim();
    shape[x.ndim() - 1] = m;
    let mut z = Array::<Complex64, D>::zeros(shape);
    log::debug!("forward real fft: {} slices of length {}", x.len() / n, n);

    let input = x.as_slice().expect(STANDARD_LAYOUT);
    let output: &mut [f64] = bytemuck::cast_slice_mut(z.as_slice_mut().expect(STANDARD_LAYOUT));
    for (slice, (src, dst)) in input
        .chunks_exact(n)
        .zip(output.chunks_exact_mut(2 * m))
        .enumerate()
    {
        repack::rfft_slice(&mut plan, src, dst)
            .map_err(|source| transform_failed(&plan, slice, source))?;
    }
    Ok(z)
}

fn real_backward<E, S, D>(engine: &E, x: &ArrayBase<S, D>) -> Result<Array<f64, D>>
where
    E: FftEngine,
    S: Data,
    S::Elem: Element,
    D: Dimension,
{
    let x = normalize::to_complex(x);
    let l = last_axis_len(&x);
    let mut plan = PlanGuard::acquire(engine, l, PlanFamily::Real)?;
    let mut z = Array::<f64, D>::zeros(x.raw_dim());
    log::debug!("backward real fft: {} slices of length {}", z.len() / l, l);

    let input: &[f64] = bytemuck::cast_slice(x.as_slice().expect(STANDARD_LAYOUT));
    let output = z.as_slice_mut().expect(STANDARD_LAYOUT);
    for (slice, (src, dst)) in input
        .chunks_exact(2 * l)
        .zip(output.chunks_exact_mut(l))
        .enumerate()
    {
        repack::irfft_slice(&mut plan, src, dst)
            .map_err(|source| transform_failed(&plan, slice, source))?;
    }
    Ok(z)
}

create_transform!(
    /// Complex-to-complex forward Fourier Transform along the last axis.
    ///
    /// The input is coerced to `Complex<f64>`. The output has the same shape.
    ///
    /// # Errors
    /// [`AllocationError`] if no plan can be built for the length of the
    /// last axis (e.g. zero), or if the engine fails on one of the lanes.
    ///
    /// # Example
    /// ```
    /// use ndarray::{Array, Dim, Ix};
    /// use ndbatchfft::{cfft, Complex};
    ///
    /// let (nx, ny) = (6, 4);
    /// let mut data = Array::<Complex<f64>, Dim<[Ix; 2]>>::zeros((nx, ny));
    /// for (i, v) in data.iter_mut().enumerate() {
    ///     v.re = i as f64;
    ///     v.im = -1.0 * i as f64;
    /// }
    /// let vhat = cfft(&data).unwrap();
    /// assert_eq!(vhat.shape(), data.shape());
    /// ```
    cfft,
    /// [`cfft`] computed by `engine`.
    ///
    /// # Errors
    /// See [`cfft`].
    cfft_with,
    Element,
    Complex64,
    complex_transform,
    Direction::Forward
);

create_transform!(
    /// Complex-to-complex inverse Fourier Transform along the last axis,
    /// scaled by *1/n*.
    ///
    /// # Errors
    /// See [`cfft`].
    ///
    /// # Example
    /// ```
    /// use ndarray::array;
    /// use ndbatchfft::{cfft, icfft, Complex};
    ///
    /// let x = array![1., 2., 3.].mapv(|x| Complex::new(x, x));
    /// let xhat = cfft(&x).unwrap();
    /// let y = icfft(&xhat).unwrap();
    /// for (a, b) in x.iter().zip(y.iter()) {
    ///     assert!((a - b).norm() < 1e-12);
    /// }
    /// ```
    icfft,
    /// [`icfft`] computed by `engine`.
    ///
    /// # Errors
    /// See [`cfft`].
    icfft_with,
    Element,
    Complex64,
    complex_transform,
    Direction::Backward
);

create_transform!(
    /// Real-to-complex forward Fourier Transform along the last axis.
    ///
    /// The input is coerced to `f64`. A last axis of length *n* becomes
    /// *n/2+1* complex bins; the imaginary parts of the first bin and, for
    /// even *n*, of the last bin are exactly zero.
    ///
    /// # Errors
    /// See [`cfft`].
    ///
    /// # Example
    /// ```
    /// use ndarray::array;
    /// use ndbatchfft::rfft;
    ///
    /// let x = array![[1., 0., -1., 0.], [1., 1., 1., 1.]];
    /// let xhat = rfft(&x).unwrap();
    /// assert_eq!(xhat.shape(), &[2, 3]);
    /// assert!((xhat[[0, 1]].re - 2.).abs() < 1e-12);
    /// assert!((xhat[[1, 0]].re - 4.).abs() < 1e-12);
    /// ```
    rfft,
    /// [`rfft`] computed by `engine`.
    ///
    /// # Errors
    /// See [`cfft`].
    rfft_with,
    RealElement,
    Complex64,
    real_forward
);

create_transform!(
    /// Complex-to-real inverse Fourier Transform along the last axis,
    /// scaled by *1/l*.
    ///
    /// The input is coerced to `Complex<f64>`. A last axis of *l* complex
    /// values gives *l* real values: the real part of the first value is the
    /// DC component, the following *l-1* doubles (real and imaginary parts
    /// in turn) are taken as the remaining bins of a length-*l* real signal.
    /// The imaginary part of the first value is ignored, as are doubles past
    /// the first *l+1*.
    ///
    /// # Errors
    /// See [`cfft`].
    ///
    /// # Example
    /// Inverse of [`rfft`] via zero padding
    /// ```
    /// use ndarray::{array, s, Array1};
    /// use ndbatchfft::{irfft, rfft, Complex};
    ///
    /// let x = array![1., 2., 3., 4., 5., 6.];
    /// let xhat = rfft(&x).unwrap();
    /// let mut padded = Array1::<Complex<f64>>::zeros(x.len());
    /// padded.slice_mut(s![..xhat.len()]).assign(&xhat);
    /// let y = irfft(&padded).unwrap();
    /// for (a, b) in x.iter().zip(y.iter()) {
    ///     assert!((a - b).abs() < 1e-12);
    /// }
    /// ```
    irfft,
    /// [`irfft`] computed by `engine`.
    ///
    /// # Errors
    /// See [`cfft`].
    irfft_with,
    Element,
    f64,
    real_backward
);
