//! Composite video simulation for Apple II hi-res and double hi-res screens.
//!
//! A digital rgb framebuffer is encoded onto an NTSC color carrier, band limited with the luma and
//! chroma filters of a composite monitor, and decoded back to rgb, reproducing the color fringing
//! seen on period displays.

pub mod error;
pub mod framebuffer;
pub mod ntsc;
pub mod types;

pub use error::NtscError;
pub use framebuffer::{Framebuffer, Geometry, YuvImage};
pub use ntsc::{simulate, DisplayMode, NtscConfig, NtscFilter};
