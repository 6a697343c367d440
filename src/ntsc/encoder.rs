use rayon::prelude::*;
use log::trace;
use crate::framebuffer::{Framebuffer, YuvImage};
use crate::ntsc::{DisplayMode, NtscConfig};
use crate::types::{RgbPixel, SignalFloat, YuvSample, PI};

/// The color carrier phase in radians at the centre of column `x`.
pub fn subcarrier_phase(x: usize, mode: DisplayMode, config: &NtscConfig) -> SignalFloat {
    let cycles = config.subcarrier * (x as SignalFloat + mode.column_offset() + 0.5);
    2.0 * PI * (cycles + config.phase_bias)
}

/// Encode one pixel at the given carrier phase. Red carries the luma; green and blue are the
/// amplitudes of the sine and cosine components of the chroma.
pub fn encode_pixel((r, g, b): RgbPixel, phase: SignalFloat) -> YuvSample {
    let y = r as SignalFloat / 255.0;
    let u = g as SignalFloat / 255.0 * SignalFloat::sin(phase);
    let v = b as SignalFloat / 255.0 * SignalFloat::cos(phase);

    (y, u, v)
}

/// Encode a whole framebuffer onto the carrier. Every scanline starts at the same phase.
pub fn encode(framebuffer: &Framebuffer, mode: DisplayMode, config: &NtscConfig) -> YuvImage {
    let mut image = YuvImage::new(framebuffer.geometry());

    // The phase only depends on the column, so compute it once for all rows.
    let phases: Vec<SignalFloat> = (0..framebuffer.width())
        .map(|x| subcarrier_phase(x, mode, config))
        .collect();

    let row_len = image.row_len();
    image
        .samples_mut()
        .par_chunks_mut(row_len)
        .zip(framebuffer.as_raw().par_chunks(framebuffer.row_len()))
        .for_each(|(out, pixels)| {
            let pixels = pixels.chunks_exact(3).zip(&phases);
            for (sample, (pixel, &phase)) in out.iter_mut().zip(pixels) {
                *sample = encode_pixel((pixel[0], pixel[1], pixel[2]), phase);
            }
        });

    trace!("encoded {} scanlines", framebuffer.height());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Geometry;

    #[test]
    fn phase_advances_a_quarter_cycle_per_column() {
        let config = NtscConfig::default();
        for mode in [DisplayMode::HiRes, DisplayMode::DoubleHiRes] {
            let a = subcarrier_phase(10, mode, &config);
            let b = subcarrier_phase(11, mode, &config);
            assert!((b - a - PI / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn phase_at_column_zero() {
        let config = NtscConfig::default();
        let expected = 2.0 * PI * (0.25 * 77.5 + 0.9083333333333333);
        assert!((subcarrier_phase(0, DisplayMode::DoubleHiRes, &config) - expected).abs() < 1e-12);
        let expected = 2.0 * PI * (0.25 * 84.5 + 0.9083333333333333);
        assert!((subcarrier_phase(0, DisplayMode::HiRes, &config) - expected).abs() < 1e-12);
    }

    #[test]
    fn red_is_luma() {
        let (y, u, v) = encode_pixel((255, 0, 0), 1.234);
        assert_eq!(y, 1.0);
        assert_eq!(u, 0.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn chroma_follows_sine_and_cosine() {
        let (y, u, v) = encode_pixel((0, 255, 255), PI / 6.0);
        assert_eq!(y, 0.0);
        assert!((u - 0.5).abs() < 1e-12);
        assert!((v - SignalFloat::sqrt(3.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn encode_matches_per_pixel() {
        let config = NtscConfig::default();
        let mut fb = Framebuffer::new(Geometry::new(6, 2));
        fb.set(3, 1, (10, 200, 100));
        fb.set(0, 0, (255, 255, 255));

        let image = encode(&fb, DisplayMode::DoubleHiRes, &config);
        for y in 0..2 {
            for x in 0..6 {
                let phase = subcarrier_phase(x, DisplayMode::DoubleHiRes, &config);
                assert_eq!(image.get(x, y), encode_pixel(fb.get(x, y), phase));
            }
        }
    }
}
