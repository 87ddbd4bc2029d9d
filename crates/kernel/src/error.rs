//! Everything that can go wrong before a kernel touches a buffer.

/// `Error`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The kernels are only defined for 3 interleaved channels.
    UnsupportedFormat {
        /// The channel count that was actually found.
        channels: u8,
    },
    /// The data doesn't match the declared dimensions.
    BufferLength {
        /// `width * height * channels`.
        expected: usize,
        /// What we were given.
        actual: usize,
    },
    /// The dimensions can't be represented as a byte count on this platform.
    TooLarge {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedFormat { channels } => write!(
                f,
                "Unsupported format: brightness kernels need 3-channel images, found {channels} \
                 channel(s)"
            ),
            Self::BufferLength { expected, actual } => write!(
                f,
                "Buffer length mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::TooLarge { width, height } => {
                write!(f, "Image dimensions {width}x{height} are too large")
            }
        }
    }
}

impl std::error::Error for Error {}
