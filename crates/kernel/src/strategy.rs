//! Picking a kernel at call time.

use crate::{Error, Frame};

/// The ways of applying a brightness offset. They all produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Per-byte scalar code. The reference that the others are checked against.
    Baseline,
    /// 32 bytes per step with explicit min/max clamping, falling back to scalar for row tails.
    Wide,
    /// 16 bytes per step with one-directional saturating arithmetic over the raw buffer.
    Narrow,
}

impl Strategy {
    /// Every strategy, baseline first.
    pub const ALL: [Self; 3] = [Self::Baseline, Self::Wide, Self::Narrow];

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Baseline => "Baseline",
            Self::Wide => "Wide",
            Self::Narrow => "Narrow",
        }
    }

    /// Apply the offset to a copy of the frame. The original is never touched.
    pub fn apply(self, frame: &Frame, offset: i32) -> Result<Frame, Error> {
        frame.ensure_supported()?;
        let mut output = frame.clone();
        self.apply_in_place(&mut output, offset)?;
        Ok(output)
    }

    /// Apply the offset directly to the frame.
    pub fn apply_in_place(self, frame: &mut Frame, offset: i32) -> Result<(), Error> {
        frame.ensure_supported()?;

        match self {
            Self::Baseline => crate::scalar::brightness(frame.as_bytes_mut(), offset),
            Self::Wide => {
                let row_bytes = frame.row_bytes();
                crate::wide::brightness(frame.as_bytes_mut(), row_bytes, offset);
            }
            Self::Narrow => {
                let too_large = Error::TooLarge {
                    width: frame.width(),
                    height: frame.height(),
                };
                let width = usize::try_from(frame.width()).map_err(|_| too_large.clone())?;
                let height = usize::try_from(frame.height()).map_err(|_| too_large)?;
                let data = frame.as_bytes_mut();
                // SAFETY: A supported `Frame` holds exactly `width * height * 3` bytes and we have
                // exclusive access to them.
                unsafe { crate::narrow::brightness_raw(data.as_mut_ptr(), width, height, offset) };
            }
        }

        Ok(())
    }
}

impl core::fmt::Display for Strategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[expect(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::unwrap_used,
    reason = "They're just tests"
)]
