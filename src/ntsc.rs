mod encoder;
mod decoder;
mod color;
mod window;

pub use encoder::*;
pub use decoder::*;
pub use color::*;
pub use window::*;

use std::time::Instant;
use log::info;
use crate::error::NtscError;
use crate::framebuffer::{Framebuffer, Geometry};
use crate::types::SignalFloat;

/// The rate the composite signal is sampled at in hz, four times the color carrier frequency.
/// Each framebuffer column is one sample.
pub const NTSC_SAMPLE_RATE: SignalFloat = 14318181.818182;

/// The color carrier frequency as a fraction of the sample rate.
pub const NTSC_SUBCARRIER: SignalFloat = 0.25;

/// Bandwidth of the luma low pass filter in hz.
pub const LUMA_BANDWIDTH: SignalFloat = 2_000_000.0;

/// Bandwidth of the chroma low pass filters in hz.
pub const CHROMA_BANDWIDTH: SignalFloat = 600_000.0;

/// Carrier phase at the start of a scanline, in cycles. Calibrated by eye against real hardware.
pub const PHASE_BIAS: SignalFloat = 0.9083333333333333;

/// The number of taps in each decoder filter.
pub const FILTER_LENGTH: usize = 17;

/// Sidelobe attenuation of the Chebyshev window in dB.
pub const SIDELOBE_DB: SignalFloat = 50.0;

/// Column offset of the first double hi-res pixel relative to the color burst.
pub const DOUBLE_HI_RES_OFFSET: SignalFloat = 77.0;

/// Column offset of the first hi-res pixel relative to the color burst.
pub const HI_RES_OFFSET: SignalFloat = 84.0;

/// Which Apple II graphics mode produced the framebuffer. The modes start their pixels at
/// different points along the scanline, which shifts the carrier phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    HiRes,
    DoubleHiRes,
}

impl DisplayMode {
    pub fn column_offset(self) -> SignalFloat {
        match self {
            DisplayMode::HiRes => HI_RES_OFFSET,
            DisplayMode::DoubleHiRes => DOUBLE_HI_RES_OFFSET,
        }
    }
}

impl From<bool> for DisplayMode {
    /// `true` selects double hi-res.
    fn from(double_hi_res: bool) -> Self {
        if double_hi_res {
            DisplayMode::DoubleHiRes
        } else {
            DisplayMode::HiRes
        }
    }
}

/// Parameters of the simulated composite signal. The defaults reproduce the calibrated Apple II
/// look and rarely need changing.
#[derive(Debug, Clone, PartialEq)]
pub struct NtscConfig {
    pub sample_rate: SignalFloat,
    pub subcarrier: SignalFloat,
    pub luma_bandwidth: SignalFloat,
    pub chroma_bandwidth: SignalFloat,
    pub phase_bias: SignalFloat,
    pub filter_length: usize,
    pub sidelobe_db: SignalFloat,

    /// The screen size every input framebuffer must have.
    pub geometry: Geometry,
}

impl Default for NtscConfig {
    fn default() -> Self {
        Self {
            sample_rate: NTSC_SAMPLE_RATE,
            subcarrier: NTSC_SUBCARRIER,
            luma_bandwidth: LUMA_BANDWIDTH,
            chroma_bandwidth: CHROMA_BANDWIDTH,
            phase_bias: PHASE_BIAS,
            filter_length: FILTER_LENGTH,
            sidelobe_db: SIDELOBE_DB,
            geometry: Geometry::DOUBLE_HI_RES,
        }
    }
}

/// The full composite round trip: encode a framebuffer onto the carrier, low pass it the way a
/// composite monitor's bandwidth would, and decode it back to rgb.
///
/// The input framebuffer's red channel is taken as luma and its green and blue channels as the
/// chroma amplitudes, which is how the Apple II screen decoders shape their output.
pub struct NtscFilter {
    config: NtscConfig,
    taps: TapSet,
}

impl NtscFilter {
    /// Create a filter, designing its taps up front.
    pub fn new(config: NtscConfig) -> Result<Self, NtscError> {
        let taps = TapSet::new(&config)?;
        Ok(Self { config, taps })
    }

    pub fn config(&self) -> &NtscConfig {
        &self.config
    }

    pub fn taps(&self) -> &TapSet {
        &self.taps
    }

    /// Run a framebuffer through the composite signal. Fails before touching any pixel if the
    /// framebuffer doesn't have the configured geometry.
    pub fn process(
        &self,
        framebuffer: &Framebuffer,
        mode: DisplayMode,
    ) -> Result<Framebuffer, NtscError> {
        self.config.geometry.validate(framebuffer)?;

        let start = Instant::now();
        let encoded = encode(framebuffer, mode, &self.config);
        let decoded = decode(&encoded, &self.taps);
        let output = to_rgb(&decoded);

        info!(
            "simulated {}x{} {:?} frame in {:?}",
            framebuffer.width(),
            framebuffer.height(),
            mode,
            start.elapsed()
        );

        Ok(output)
    }
}

/// Run a framebuffer through the composite signal with the default configuration.
pub fn simulate(framebuffer: &Framebuffer, double_hi_res: bool) -> Result<Framebuffer, NtscError> {
    NtscFilter::new(NtscConfig::default())?.process(framebuffer, double_hi_res.into())
}
