//! Element-type coercion and layout normalization of input arrays.
//!
//! The batch loop walks the input as one flat slice, so every input is
//! brought to the element type of the transform and to standard
//! (row-major) layout first. Arrays that already satisfy both are borrowed,
//! everything else is copied into a fresh owned array.
use ndarray::{ArrayBase, ArrayView, CowArray, Data, Dimension};
use num_complex::{Complex, Complex64};

/// Element types that can be coerced to `Complex<f64>`.
pub trait Element: Copy + 'static {
    /// Widens a single value.
    fn to_complex(self) -> Complex64;

    /// Coerces a whole view. Only `Complex<f64>` itself is borrowed.
    fn cast_complex<D: Dimension>(view: ArrayView<'_, Self, D>) -> CowArray<'_, Complex64, D> {
        log::trace!("coercing {} elements to complex", view.len());
        CowArray::from(view.mapv(Self::to_complex))
    }
}

/// Element types that can be coerced to `f64`.
///
/// Complex types deliberately do not implement this trait, a complex array
/// is not silently truncated to its real part.
pub trait RealElement: Element {
    /// Widens a single value.
    fn to_real(self) -> f64;

    /// Coerces a whole view. Only `f64` itself is borrowed.
    fn cast_real<D: Dimension>(view: ArrayView<'_, Self, D>) -> CowArray<'_, f64, D> {
        log::trace!("coercing {} elements to real", view.len());
        CowArray::from(view.mapv(Self::to_real))
    }
}

impl Element for Complex64 {
    fn to_complex(self) -> Complex64 {
        self
    }

    fn cast_complex<D: Dimension>(view: ArrayView<'_, Self, D>) -> CowArray<'_, Complex64, D> {
        CowArray::from(view)
    }
}

impl Element for Complex<f32> {
    fn to_complex(self) -> Complex64 {
        Complex64::new(f64::from(self.re), f64::from(self.im))
    }
}

impl Element for f64 {
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.)
    }
}

impl RealElement for f64 {
    fn to_real(self) -> f64 {
        self
    }

    fn cast_real<D: Dimension>(view: ArrayView<'_, Self, D>) -> CowArray<'_, f64, D> {
        CowArray::from(view)
    }
}

macro_rules! impl_real_element {
    ($($t: ty),*) => {
        $(
            impl Element for $t {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_complex(self) -> Complex64 {
                    Complex64::new(self as f64, 0.)
                }
            }

            impl RealElement for $t {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_real(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_real_element!(f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Brings `a` into standard layout, copying only if it is not already.
fn standard_layout<A: Clone, D: Dimension>(a: CowArray<'_, A, D>) -> CowArray<'_, A, D> {
    if a.is_standard_layout() {
        a
    } else {
        log::trace!("duplicating non-contiguous array of shape {:?}", a.shape());
        CowArray::from(a.as_standard_layout().into_owned())
    }
}

/// Complex, standard-layout version of `x`.
pub fn to_complex<S, D>(x: &ArrayBase<S, D>) -> CowArray<'_, Complex64, D>
where
    S: Data,
    S::Elem: Element,
    D: Dimension,
{
    standard_layout(<S::Elem as Element>::cast_complex(x.view()))
}

/// Real, standard-layout version of `x`.
pub fn to_real<S, D>(x: &ArrayBase<S, D>) -> CowArray<'_, f64, D>
where
    S: Data,
    S::Elem: RealElement,
    D: Dimension,
{
    standard_layout(<S::Elem as RealElement>::cast_real(x.view()))
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{array, s, Array2, ShapeBuilder};

    #[test]
    fn test_matching_contiguous_input_is_borrowed() {
        let x = array![[1., 2.], [3., 4.]];
        let y = to_real(&x);
        assert!(y.is_view());
        assert_eq!(y.as_ptr(), x.as_ptr());

        let z = array![Complex64::new(1., -1.), Complex64::new(0., 2.)];
        assert!(to_complex(&z).is_view());
    }

    #[test]
    fn test_coercion_copies() {
        let x = array![[1_i32, -2], [3, 4]];
        let y = to_complex(&x);
        assert!(y.is_owned());
        assert_eq!(y[[0, 1]], Complex64::new(-2., 0.));

        let x = array![0.5_f32, 1.5];
        let y = to_real(&x);
        assert!(y.is_owned());
        assert_eq!(y, array![0.5, 1.5]);

        let x = array![Complex::<f32>::new(1., 2.)];
        assert_eq!(to_complex(&x)[0], Complex64::new(1., 2.));
    }

    #[test]
    fn test_non_contiguous_input_is_duplicated() {
        let x = Array2::from_shape_vec((2, 3).f(), vec![1., 2., 3., 4., 5., 6.]).unwrap();
        let y = to_real(&x);
        assert!(y.is_owned());
        assert!(y.is_standard_layout());
        assert_eq!(y, x);
        assert_eq!(y.as_slice().unwrap(), &[1., 3., 5., 2., 4., 6.]);

        let x = array![[1., 2., 3., 4.], [5., 6., 7., 8.]];
        let strided = x.slice(s![.., ..;2]);
        let y = to_complex(&strided);
        assert!(y.is_standard_layout());
        assert_eq!(y[[1, 1]], Complex64::new(7., 0.));
        // source untouched
        assert_eq!(x[[1, 2]], 7.);
    }
}
