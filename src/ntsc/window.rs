use log::debug;
use crate::error::NtscError;
use crate::ntsc::NtscConfig;
use crate::types::{SignalFloat, PI};

/// Inverse DFT of a real sequence, keeping only the real part of the output.
pub fn real_idft(array: &[SignalFloat]) -> Vec<SignalFloat> {
    let size = array.len() as SignalFloat;

    (0..array.len())
        .map(|i| {
            let omega = 2.0 * PI * i as SignalFloat / size;
            let sum: SignalFloat = array
                .iter()
                .enumerate()
                .map(|(j, value)| value * SignalFloat::cos(j as SignalFloat * omega))
                .sum();
            sum / size
        })
        .collect()
}

/// Dolph-Chebyshev window of length `n` with `sidelobe_db` of sidelobe attenuation, scaled so the
/// peak is 1.
///
/// The window is built in the frequency domain from the Chebyshev polynomial of order `n - 1`,
/// brought back with a real inverse DFT, then made symmetric by halving the first sample and
/// mirroring it into the last.
pub fn chebyshev_window(n: usize, sidelobe_db: SignalFloat) -> Result<Vec<SignalFloat>, NtscError> {
    if n < 2 {
        return Err(NtscError::FilterLength { length: n });
    }

    // acosh is only defined from 1 upwards, which rules out negative (and NaN) attenuation.
    let ripple = SignalFloat::powf(10.0, sidelobe_db / 20.0);
    if !(ripple >= 1.0) {
        return Err(NtscError::SidelobeOutOfRange { sidelobe_db });
    }

    let m = n - 1;
    let order = m as SignalFloat;
    let alpha = SignalFloat::cosh(SignalFloat::acosh(ripple) / order);

    let spectrum: Vec<SignalFloat> = (0..m)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            let a = SignalFloat::abs(alpha * SignalFloat::cos(PI * i as SignalFloat / order));
            if a > 1.0 {
                sign * SignalFloat::cosh(order * SignalFloat::acosh(a))
            } else {
                sign * SignalFloat::cos(order * SignalFloat::acos(a))
            }
        })
        .collect();

    let mut w = real_idft(&spectrum);
    w.resize(n, 0.0);
    w[0] /= 2.0;
    w[n - 1] = w[0];

    let max = w.iter().fold(0.0, |max: SignalFloat, value| max.max(value.abs()));
    Ok(scale(&w, 1.0 / max))
}

/// Sinc low pass window of length `n` centred on `n / 2`. `cutoff` is a fraction of the sample
/// rate and is capped at nyquist.
pub fn lanczos_window(n: usize, cutoff: SignalFloat) -> Vec<SignalFloat> {
    let cutoff = SignalFloat::min(cutoff, 0.5);
    let half_n = (n / 2) as SignalFloat;

    (0..n)
        .map(|i| {
            let x = 2.0 * PI * cutoff * (i as SignalFloat - half_n);
            if x == 0.0 {
                1.0
            } else {
                SignalFloat::sin(x) / x
            }
        })
        .collect()
}

/// Scale so the elements sum to 1 (unity DC gain).
pub fn normalize(array: &[SignalFloat]) -> Vec<SignalFloat> {
    let sum: SignalFloat = array.iter().sum();
    scale(array, 1.0 / sum)
}

pub fn scale(array: &[SignalFloat], k: SignalFloat) -> Vec<SignalFloat> {
    array.iter().map(|value| value * k).collect()
}

/// Elementwise product of two windows of the same length.
pub fn multiply(a: &[SignalFloat], b: &[SignalFloat]) -> Vec<SignalFloat> {
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}

/// A symmetric, odd length FIR filter. Only the centre tap and one side are stored: `half[0]` is
/// the centre and `half[i]` applies to the samples `i` away on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricFir {
    half: Vec<SignalFloat>,
}

impl SymmetricFir {
    /// Fold a full symmetric window. The right hand side is kept; callers build windows that are
    /// symmetric to rounding error.
    pub fn from_window(window: &[SignalFloat]) -> Result<Self, NtscError> {
        let length = window.len();
        if length < 3 || length % 2 == 0 {
            return Err(NtscError::FilterLength { length });
        }

        Ok(Self { half: window[length / 2..].to_vec() })
    }

    /// Taps from the centre outwards.
    pub fn half(&self) -> &[SignalFloat] {
        &self.half
    }

    /// The full symmetric tap sequence, left edge first.
    pub fn full(&self) -> Vec<SignalFloat> {
        self.half.iter().rev().chain(&self.half[1..]).copied().collect()
    }

    /// Sum of every tap in the full filter, i.e. its DC gain.
    pub fn dc_gain(&self) -> SignalFloat {
        self.half[0] + 2.0 * self.half[1..].iter().sum::<SignalFloat>()
    }
}

/// One low pass filter per channel, built once and shared read-only by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct TapSet {
    pub luma: SymmetricFir,
    pub chroma_u: SymmetricFir,
    pub chroma_v: SymmetricFir,
}

impl TapSet {
    /// Design the luma and chroma filters: a Chebyshev window shaped by a per channel Lanczos
    /// low pass at the channel's bandwidth. Chroma taps get an extra gain of 2.
    pub fn new(config: &NtscConfig) -> Result<Self, NtscError> {
        let n = config.filter_length;
        if n < 3 || n % 2 == 0 {
            return Err(NtscError::FilterLength { length: n });
        }

        let w = chebyshev_window(n, config.sidelobe_db)?;
        let y_cutoff = config.luma_bandwidth / config.sample_rate;
        let uv_cutoff = config.chroma_bandwidth / config.sample_rate;

        let wy = lowpass_taps(&w, y_cutoff);
        let wu = scale(&lowpass_taps(&w, uv_cutoff), 2.0);
        let wv = scale(&lowpass_taps(&w, uv_cutoff), 2.0);

        let taps = Self {
            luma: SymmetricFir::from_window(&wy)?,
            chroma_u: SymmetricFir::from_window(&wu)?,
            chroma_v: SymmetricFir::from_window(&wv)?,
        };
        debug!("decoder matrix = {:?}", taps.decoder_matrix());

        Ok(taps)
    }

    /// Per offset coefficient rows `[y, u, v]`, centre first.
    pub fn decoder_matrix(&self) -> Vec<[SignalFloat; 3]> {
        self.luma
            .half()
            .iter()
            .zip(self.chroma_u.half())
            .zip(self.chroma_v.half())
            .map(|((&y, &u), &v)| [y, u, v])
            .collect()
    }
}

/// Unity gain low pass taps: `window` multiplied by a Lanczos window at `cutoff`.
pub fn lowpass_taps(window: &[SignalFloat], cutoff: SignalFloat) -> Vec<SignalFloat> {
    normalize(&multiply(window, &lanczos_window(window.len(), cutoff)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Calibration tables the composite look was tuned against.
    const REFERENCE_WY: [f64; 17] = [
        0.0012969893416029652, -0.0007181026579346038, -0.009993295243617743, -0.022103770406847224,
        -0.015383159829078933, 0.03665489905357039, 0.1346162732936952, 0.23592607033063934,
        0.27940819223594177, 0.23592607033063925, 0.1346162732936951, 0.036654899053570264,
        -0.01538315982907891, -0.022103770406847304, -0.009993295243617743, -0.0007181026579346008,
        0.0012969893416029652,
    ];
    const REFERENCE_WU: [f64; 17] = [
        0.005147919379870954, 0.015432708160017513, 0.03647844231774774, 0.07008157238459167,
        0.1150901077856405, 0.16601592153114964, 0.2137255023867992, 0.2478785632740175,
        0.26029852556033184, 0.24787856327401742, 0.21372550238679902, 0.1660159215311491,
        0.11509010778564033, 0.07008157238459192, 0.03647844231774774, 0.015432708160017447,
        0.005147919379870954,
    ];

    fn assert_close(a: &[f64], b: &[f64], tolerance: f64) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).abs() < tolerance, "tap {}: {} != {}", i, x, y);
        }
    }

    fn assert_symmetric(w: &[f64]) {
        for i in 0..w.len() {
            assert!((w[i] - w[w.len() - 1 - i]).abs() < 1e-12, "asymmetric at {}", i);
        }
    }

    #[test]
    fn chebyshev_peaks_at_one_in_the_centre() {
        let w = chebyshev_window(17, 50.0).unwrap();
        assert_eq!(w.len(), 17);
        assert!((w[8] - 1.0).abs() < 1e-12);
        assert!((w[0] - 0.048440112452484876).abs() < 1e-12);
        assert_eq!(w[0], w[16]);
        assert_symmetric(&w);
    }

    #[test]
    fn chebyshev_rejects_negative_attenuation() {
        assert_eq!(
            chebyshev_window(17, -3.0),
            Err(NtscError::SidelobeOutOfRange { sidelobe_db: -3.0 })
        );
        assert!(chebyshev_window(17, f64::NAN).is_err());
        assert_eq!(chebyshev_window(1, 50.0), Err(NtscError::FilterLength { length: 1 }));
    }

    #[test]
    fn lanczos_is_one_at_the_centre() {
        let w = lanczos_window(17, 0.1);
        assert_eq!(w[8], 1.0);
        assert_symmetric(&w);
        // x = 2*pi*0.25*2 = pi
        let w = lanczos_window(5, 0.25);
        assert!(w[0].abs() < 1e-15);
    }

    #[test]
    fn lanczos_cutoff_is_capped_at_nyquist() {
        assert_eq!(lanczos_window(9, 0.9), lanczos_window(9, 0.5));
    }

    #[test]
    fn normalize_and_scale() {
        assert_eq!(normalize(&[1.0, 2.0, 1.0]), vec![0.25, 0.5, 0.25]);
        assert_eq!(scale(&[1.0, -2.0], 3.0), vec![3.0, -6.0]);
        assert_eq!(multiply(&[1.0, 2.0], &[3.0, 4.0]), vec![3.0, 8.0]);
    }

    #[test]
    fn real_idft_of_impulse_is_flat() {
        let w = real_idft(&[4.0, 0.0, 0.0, 0.0]);
        assert_close(&w, &[1.0, 1.0, 1.0, 1.0], 1e-15);
    }

    #[test]
    fn default_taps_match_reference_tables() {
        let taps = TapSet::new(&NtscConfig::default()).unwrap();
        assert_close(&taps.luma.full(), &REFERENCE_WY, 1e-12);
        // The chroma table already carries the x2 gain.
        assert_close(&taps.chroma_u.full(), &REFERENCE_WU, 1e-12);
        assert!((REFERENCE_WU.iter().sum::<f64>() - 2.0).abs() < 1e-9);
        assert_eq!(taps.chroma_u, taps.chroma_v);
    }

    #[test]
    fn taps_have_unity_gain() {
        let config = NtscConfig::default();
        let w = chebyshev_window(config.filter_length, config.sidelobe_db).unwrap();
        for bandwidth in [config.luma_bandwidth, config.chroma_bandwidth] {
            let taps = lowpass_taps(&w, bandwidth / config.sample_rate);
            assert_eq!(taps.len(), 17);
            assert!((taps.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert_symmetric(&taps);
        }

        let taps = TapSet::new(&config).unwrap();
        assert!((taps.luma.dc_gain() - 1.0).abs() < 1e-9);
        assert!((taps.chroma_u.dc_gain() - 2.0).abs() < 1e-9);
        assert!((taps.chroma_v.dc_gain() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn decoder_matrix_runs_centre_out() {
        let taps = TapSet::new(&NtscConfig::default()).unwrap();
        let matrix = taps.decoder_matrix();
        assert_eq!(matrix.len(), 9);
        assert!((matrix[0][0] - REFERENCE_WY[8]).abs() < 1e-12);
        assert!((matrix[8][1] - REFERENCE_WU[0]).abs() < 1e-12);
    }

    #[test]
    fn symmetric_fir_folds_and_unfolds() {
        let fir = SymmetricFir::from_window(&[1.0, 2.0, 3.0, 2.0, 1.0]).unwrap();
        assert_eq!(fir.half(), &[3.0, 2.0, 1.0]);
        assert_eq!(fir.full(), vec![1.0, 2.0, 3.0, 2.0, 1.0]);
        assert_eq!(fir.full().len(), 5);
        assert_eq!(fir.dc_gain(), 9.0);
        assert_eq!(
            SymmetricFir::from_window(&[1.0, 1.0]),
            Err(NtscError::FilterLength { length: 2 })
        );
    }

    #[test]
    fn even_filter_lengths_are_rejected() {
        let config = NtscConfig { filter_length: 16, ..NtscConfig::default() };
        assert_eq!(TapSet::new(&config), Err(NtscError::FilterLength { length: 16 }));
    }
}
