use ndarray::{Array, Dim, Ix};
use ndbatchfft::{irfft, rfft, Complex};

fn main() {
    let (nx, ny) = (6, 4);
    let mut data = Array::<f64, Dim<[Ix; 2]>>::zeros((nx, ny));
    for (i, v) in data.iter_mut().enumerate() {
        *v = i as f64;
    }
    let vhat = match rfft(&data) {
        Ok(vhat) => vhat,
        Err(err) => {
            eprintln!("rfft failed: {err}");
            std::process::exit(1);
        }
    };
    let mut padded = Array::<Complex<f64>, Dim<[Ix; 2]>>::zeros((nx, ny));
    padded
        .slice_mut(ndarray::s![.., ..ny / 2 + 1])
        .assign(&vhat);
    match irfft(&padded) {
        Ok(back) => println!("vhat: {vhat}\nback: {back}"),
        Err(err) => eprintln!("irfft failed: {err}"),
    }
}
