//! A flat, row-major image buffer. Channels are interleaved and rows are packed, so the stride
//! is always `width * channels` bytes.

use crate::Error;

/// `Frame`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Interleaved samples per pixel. Anything from 1 (grayscale) to 4 (with alpha) can be
    /// represented, but only 3 can be processed.
    channels: u8,
    /// The samples themselves, exactly `width * height * channels` of them.
    data: Vec<u8>,
}

impl Frame {
    /// Instantiate, checking that the data matches the dimensions.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, Error> {
        if !(1..=4).contains(&channels) {
            return Err(Error::UnsupportedFormat { channels });
        }

        let expected = byte_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Instantiate a 3-channel frame.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        Self::new(width, height, crate::SUPPORTED_CHANNELS, data)
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel.
    pub const fn channels(&self) -> u8 {
        self.channels
    }

    /// Bytes per row.
    #[expect(
        clippy::as_conversions,
        clippy::arithmetic_side_effects,
        reason = "`new()` already proved that the whole buffer size fits in a `usize`"
    )]
    pub const fn row_bytes(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// All the samples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// All the samples, mutably. The length can't change, so the dimensions stay valid.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Give up the samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Fail unless the kernels can process this frame.
    pub const fn ensure_supported(&self) -> Result<(), Error> {
        if self.channels != crate::SUPPORTED_CHANNELS {
            return Err(Error::UnsupportedFormat {
                channels: self.channels,
            });
        }
        Ok(())
    }
}

/// `width * height * channels`, without overflowing.
fn byte_count(width: u32, height: u32, channels: u8) -> Result<usize, Error> {
    let too_large = || Error::TooLarge { width, height };
    let width_usize = usize::try_from(width).map_err(|_| too_large())?;
    let height_usize = usize::try_from(height).map_err(|_| too_large())?;
    width_usize
        .checked_mul(height_usize)
        .and_then(|pixels| pixels.checked_mul(usize::from(channels)))
        .ok_or_else(too_large)
}

#[expect(clippy::unwrap_used, reason = "They're just tests")]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_matching_data() {
        let frame = Frame::rgb(2, 1, vec![10, 20, 30, 250, 0, 5]).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.row_bytes(), 6);
        assert_eq!(frame.into_raw(), vec![10, 20, 30, 250, 0, 5]);
    }

    #[test]
    fn rejects_short_data() {
        assert_eq!(
            Frame::rgb(2, 2, vec![0; 11]),
            Err(Error::BufferLength {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn represents_but_does_not_support_other_channel_counts() {
        let gray = Frame::new(4, 4, 1, vec![0; 16]).unwrap();
        assert_eq!(
            gray.ensure_supported(),
            Err(Error::UnsupportedFormat { channels: 1 })
        );

        let rgba = Frame::new(4, 4, 4, vec![0; 64]).unwrap();
        assert_eq!(
            rgba.ensure_supported(),
            Err(Error::UnsupportedFormat { channels: 4 })
        );
    }

    #[test]
    fn rejects_impossible_channel_counts() {
        assert_eq!(
            Frame::new(1, 1, 0, vec![]),
            Err(Error::UnsupportedFormat { channels: 0 })
        );
        assert_eq!(
            Frame::new(1, 1, 5, vec![0; 5]),
            Err(Error::UnsupportedFormat { channels: 5 })
        );
    }

    #[test]
    fn empty_frames_are_fine() {
        let frame = Frame::rgb(0, 7, vec![]).unwrap();
        assert!(frame.ensure_supported().is_ok());
        assert_eq!(frame.row_bytes(), 0);
    }
}
