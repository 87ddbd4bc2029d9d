//! The brightness kernels, aka the hot path. We keep them in a separate crate so that they can be
//! benchmarked and tested without any of the CLI, logging or image decoding baggage.
//!
//! Every kernel computes the same thing: each byte of a 3-channel, 8-bit, interleaved buffer
//! becomes `clamp(byte + offset, 0, 255)`. They only differ in how they get there.

pub mod error;
pub mod frame;
pub mod narrow;
pub mod scalar;
pub mod strategy;
pub mod wide;

pub use error::Error;
pub use frame::Frame;
pub use strategy::Strategy;

/// The only channel layout the kernels understand: 3 interleaved 8-bit samples per pixel.
pub const SUPPORTED_CHANNELS: u8 = 3;

/// Offsets beyond this magnitude saturate every byte, so the vector kernels clamp to it first.
pub const MAX_EFFECTIVE_OFFSET: i32 = 255;
