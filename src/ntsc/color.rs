use rayon::prelude::*;
use log::trace;
use crate::framebuffer::{Framebuffer, YuvImage};
use crate::types::{RgbPixel, SignalFloat, YuvSample};

/// Convert from yuv to 8-bit rgb. Filter ringing regularly overshoots, so each channel saturates
/// at 0 and 255.
pub fn yuv_to_rgb((y, u, v): YuvSample) -> RgbPixel {
    // https://en.wikipedia.org/wiki/YUV
    let r = y + 1.13983 * v;
    let g = y - 0.39465 * u - 0.58060 * v;
    let b = y + 2.03211 * u;

    (to_channel(r), to_channel(g), to_channel(b))
}

/// Scale to 0..255, truncate, then clamp.
fn to_channel(value: SignalFloat) -> u8 {
    // `as` truncates toward zero and saturates at the integer bounds (NaN becomes 0).
    let truncated = (value * 255.0) as i32;
    truncated.clamp(0, 255) as u8
}

/// Convert a decoded image to an rgb framebuffer of the same size.
pub fn to_rgb(image: &YuvImage) -> Framebuffer {
    let mut framebuffer = Framebuffer::new(image.geometry());

    let row_len = framebuffer.row_len();
    framebuffer
        .raw_mut()
        .par_chunks_mut(row_len)
        .zip(image.samples().par_chunks(image.row_len()))
        .for_each(|(out, row)| {
            for (pixel, &sample) in out.chunks_exact_mut(3).zip(row) {
                let (r, g, b) = yuv_to_rgb(sample);
                pixel.copy_from_slice(&[r, g, b]);
            }
        });

    trace!("converted {} scanlines to rgb", image.height());
    framebuffer
}
