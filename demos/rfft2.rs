//! Real-to-complex Fourier Transform of a batch of signals.
//!
//! Every row of the 2-dimensional input is transformed independently, the
//! last axis shrinks to n/2+1 bins.
//!
//! cargo run --example rfft2
use ndarray::{Array, Dim, Ix};
use ndbatchfft::rfft;

fn main() -> Result<(), ndbatchfft::AllocationError> {
    env_logger::init();

    let (nx, ny) = (4, 8);
    let mut data = Array::<f64, Dim<[Ix; 2]>>::zeros((nx, ny));
    for (i, v) in data.iter_mut().enumerate() {
        *v = (i as f64).sin();
    }
    let vhat = rfft(&data)?;
    println!("shape: {:?}", vhat.shape());
    println!("vhat: {vhat:.3}");

    // integer input is coerced, a transposed view is copied to standard layout
    let ints = Array::from_shape_fn((ny, nx), |(i, j)| (i * nx + j) as i32);
    let that = rfft(&ints.t())?;
    println!("transposed: {that:.3}");
    Ok(())
}
