//! `irfft` keeps the length of the last axis. Zero-padding the n/2+1 bins
//! of `rfft` back to n recovers the signal.
//!
//! cargo run --example irfft_padded
use ndarray::{array, s, Array1};
use ndbatchfft::{irfft, rfft, Complex};

fn main() -> Result<(), ndbatchfft::AllocationError> {
    env_logger::init();

    let x = array![1., 0., -1., 0., 2., 5.];
    let xhat = rfft(&x)?;

    let unpadded = irfft(&xhat)?;
    println!("irfft(rfft(x)) has {} samples: {unpadded:.3}", unpadded.len());

    let mut padded = Array1::<Complex<f64>>::zeros(x.len());
    padded.slice_mut(s![..xhat.len()]).assign(&xhat);
    let back = irfft(&padded)?;
    println!("x:    {x:.3}");
    println!("back: {back:.3}");
    Ok(())
}
