//! The scalar reference kernel. Slow, obvious and the ground truth for the others.

/// Apply the offset to a single sample.
#[inline]
pub fn adjust(sample: u8, offset: i32) -> u8 {
    let adjusted = i32::from(sample).saturating_add(offset).clamp(0, 255);
    #[expect(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "It's been clamped to the `u8` range"
    )]
    {
        adjusted as u8
    }
}

/// Apply the offset to every sample.
pub fn brightness(data: &mut [u8], offset: i32) {
    for sample in data {
        *sample = adjust(*sample, offset);
    }
}
