use rayon::prelude::*;
use log::trace;
use crate::framebuffer::YuvImage;
use crate::ntsc::{SymmetricFir, TapSet};
use crate::types::SignalFloat;

/// What a filter sees when its window hangs off either end of a scanline.
pub trait Boundary {
    /// The sample at `x`, which may lie outside `row`.
    fn sample(&self, row: &[SignalFloat], x: isize) -> SignalFloat;
}

/// Samples outside the scanline are 0, as if the signal were blanked there.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPad;

impl Boundary for ZeroPad {
    fn sample(&self, row: &[SignalFloat], x: isize) -> SignalFloat {
        usize::try_from(x)
            .ok()
            .and_then(|x| row.get(x))
            .copied()
            .unwrap_or(0.0)
    }
}

impl SymmetricFir {
    /// Filter output at column `x`: the centre sample times the centre tap, plus each pair of
    /// samples `i` either side of it times tap `i`.
    pub fn apply<B: Boundary>(&self, row: &[SignalFloat], x: usize, boundary: &B) -> SignalFloat {
        let x = x as isize;
        let half = self.half();

        let mut acc = boundary.sample(row, x) * half[0];
        for (i, tap) in half.iter().enumerate().skip(1) {
            let i = i as isize;
            acc += (boundary.sample(row, x - i) + boundary.sample(row, x + i)) * tap;
        }
        acc
    }

    /// Filter a whole scanline.
    pub fn apply_row<B: Boundary>(&self, row: &[SignalFloat], boundary: &B) -> Vec<SignalFloat> {
        (0..row.len()).map(|x| self.apply(row, x, boundary)).collect()
    }
}

/// Low pass every scanline of the encoded image, each channel through its own filter. There is no
/// vertical filtering.
pub fn decode(image: &YuvImage, taps: &TapSet) -> YuvImage {
    decode_with(image, taps, &ZeroPad)
}

/// `decode` with an explicit boundary policy.
pub fn decode_with<B: Boundary + Sync>(image: &YuvImage, taps: &TapSet, boundary: &B) -> YuvImage {
    let mut output = YuvImage::new(image.geometry());

    let row_len = output.row_len();
    output
        .samples_mut()
        .par_chunks_mut(row_len)
        .zip(image.samples().par_chunks(image.row_len()))
        .for_each(|(out, row)| {
            let ys: Vec<SignalFloat> = row.iter().map(|s| s.0).collect();
            let us: Vec<SignalFloat> = row.iter().map(|s| s.1).collect();
            let vs: Vec<SignalFloat> = row.iter().map(|s| s.2).collect();

            for (x, sample) in out.iter_mut().enumerate() {
                *sample = (
                    taps.luma.apply(&ys, x, boundary),
                    taps.chroma_u.apply(&us, x, boundary),
                    taps.chroma_v.apply(&vs, x, boundary),
                );
            }
        });

    trace!("decoded {} scanlines", image.height());
    output
}
