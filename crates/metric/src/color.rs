/// Convert an 8-bit RGB color to YUV on a 0-1 scale.
///
/// ```text
/// Y =  (0.299 R + 0.587 G + 0.114 B) / 255
/// U = (-0.147 R - 0.289 G + 0.436 B) / 255
/// V =  (0.615 R - 0.515 G - 0.100 B) / 255
/// ```
pub fn rgb_to_yuv(rgb: [u8; 3]) -> [f64; 3] {
    let r = f64::from(rgb[0]);
    let g = f64::from(rgb[1]);
    let b = f64::from(rgb[2]);
    [
        (0.299 * r + 0.587 * g + 0.114 * b) / 255.0,
        (-0.147 * r - 0.289 * g + 0.436 * b) / 255.0,
        (0.615 * r - 0.515 * g - 0.100 * b) / 255.0,
    ]
}

/// Peak signal-to-noise ratio in decibels, `10 * log10(peak_sq / mse)`.
///
/// A zero `mse` means the signals are identical and yields `+inf`. A zero
/// `peak_sq` with non-zero error yields `-inf`.
pub fn psnr(peak_sq: f64, mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (peak_sq / mse).log10()
}
