use std::error::Error;
use std::fmt;

/// Errors raised while building filters or validating framebuffers. Pixel processing itself
/// can't fail: out-of-range colors are clamped.
#[derive(Debug, Clone, PartialEq)]
pub enum NtscError {
    /// The Chebyshev sidelobe attenuation gave `acosh` an argument below 1.
    SidelobeOutOfRange { sidelobe_db: f64 },

    /// Filter lengths must be odd and at least 3 so there's a centre tap and one pair.
    FilterLength { length: usize },

    /// The framebuffer doesn't have the screen geometry the pipeline was configured for.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A raw pixel buffer doesn't hold exactly width * height rgb triples.
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for NtscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NtscError::SidelobeOutOfRange { sidelobe_db } => write!(
                f,
                "sidelobe attenuation of {} dB is out of range for a chebyshev window",
                sidelobe_db
            ),
            NtscError::FilterLength { length } => {
                write!(f, "filter length {} must be odd and at least 3", length)
            }
            NtscError::DimensionMismatch { expected, actual } => write!(
                f,
                "framebuffer is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            NtscError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer holds {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl Error for NtscError {}
