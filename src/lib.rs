//! Library exports for inkframe.
//!
//! Exposes the 1-bit paint engine, the dithering importer and the frame-diff
//! update protocol so that servers other than the bundled CLI can render
//! frames and package them for e-paper clients.

pub mod config;
pub mod dither;
pub mod draw;
pub mod protocol;
pub mod util;
pub mod widgets;

pub use config::Config;
