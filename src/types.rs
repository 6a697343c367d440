/// The floating point type to use for signal calculations. The filter taps are calibrated against
/// reference tables computed in double precision, so unlike a shader port this stays at f64.
pub type SignalFloat = f64;

/// Not really a type, but the PI constant to use with SignalFloat.
pub const PI: SignalFloat = std::f64::consts::PI as SignalFloat;

/// The type for an 8-bit rgb pixel.
pub type RgbPixel = (u8, u8, u8);

/// The type for a YUV sample. Y is luma in [0, 1], U and V are the subcarrier-modulated chroma.
pub type YuvSample = (SignalFloat, SignalFloat, SignalFloat);
