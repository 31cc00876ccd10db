//! Perform a 1-dimensional complex Fourier Transform and its inverse.
//!
//! cargo run --example cfft1
use ndarray::array;
use ndbatchfft::{cfft, icfft, Complex};

fn main() -> Result<(), ndbatchfft::AllocationError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let x = array![1., 2., 3.].mapv(|x| Complex::new(x, x));
    let xhat = cfft(&x)?;
    let back = icfft(&xhat)?;
    println!("xhat: {xhat}");
    println!("x: {back}");
    Ok(())
}
