//! The wide-vector kernel. Rows are processed 32 bytes at a time: widen to 16-bit lanes, add the
//! offset, clamp with max(0)/min(255), then narrow back down. Whatever is left at the end of a row
//! goes through the scalar kernel.
//!
//! Hardware saturating adds only protect one direction, and the offset may be negative, so the
//! clamp is done explicitly on the widened lanes.

/// Bytes per vector step.
pub const LANES: usize = 32;

/// Apply the offset to every sample, one row at a time.
///
/// `row_bytes` is the stride. `data` must hold a whole number of rows.
pub fn brightness(data: &mut [u8], row_bytes: usize, offset: i32) {
    if row_bytes == 0 {
        return;
    }
    debug_assert_eq!(
        data.len().checked_rem(row_bytes),
        Some(0),
        "buffer isn't a whole number of {row_bytes} byte rows"
    );
    let offset = clamp_offset(offset);

    #[cfg(target_arch = "x86_64")]
    if std::arch::is_x86_feature_detected!("avx2") {
        // SAFETY: We've just checked that the CPU supports AVX2.
        unsafe { brightness_avx2(data, row_bytes, offset) };
        return;
    }

    brightness_portable(data, row_bytes, offset);
}

/// Offsets beyond ±255 saturate everything anyway, and the narrower range can't overflow a
/// 16-bit lane.
fn clamp_offset(offset: i32) -> i16 {
    let clamped = offset.clamp(-crate::MAX_EFFECTIVE_OFFSET, crate::MAX_EFFECTIVE_OFFSET);
    #[expect(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        reason = "It's been clamped to ±255"
    )]
    {
        clamped as i16
    }
}

/// Drive a 32-byte group operation over every row, handing each row's tail to the scalar kernel.
#[inline(always)]
fn for_each_group(
    data: &mut [u8],
    row_bytes: usize,
    offset: i16,
    mut group: impl FnMut(&mut [u8; LANES], i16),
) {
    for row in data.chunks_exact_mut(row_bytes) {
        let mut groups = row.chunks_exact_mut(LANES);
        for chunk in &mut groups {
            if let Ok(lanes) = <&mut [u8; LANES]>::try_from(chunk) {
                group(lanes, offset);
            }
        }
        crate::scalar::brightness(groups.into_remainder(), i32::from(offset));
    }
}

/// Lane-by-lane version that the compiler is free to auto-vectorise.
fn brightness_portable(data: &mut [u8], row_bytes: usize, offset: i16) {
    for_each_group(data, row_bytes, offset, add_group_portable);
}

/// One 32-byte group, without any architecture specific help.
#[inline(always)]
fn add_group_portable(lanes: &mut [u8; LANES], offset: i16) {
    for sample in lanes.iter_mut() {
        #[expect(
            clippy::arithmetic_side_effects,
            reason = "255 + 255 and 0 - 255 both fit in an `i16`"
        )]
        let widened = i16::from(*sample) + offset;
        #[expect(
            clippy::as_conversions,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "It's been clamped to the `u8` range"
        )]
        {
            *sample = widened.max(0).min(255) as u8;
        }
    }
}

/// AVX2 driver.
///
/// # Safety
/// The CPU must support AVX2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn brightness_avx2(data: &mut [u8], row_bytes: usize, offset: i16) {
    for_each_group(data, row_bytes, offset, |lanes, group_offset| {
        // SAFETY: Only reachable from a function that requires AVX2.
        unsafe { add_group_avx2(lanes, group_offset) }
    });
}

/// One 32-byte group in a single 256-bit register pass.
///
/// # Safety
/// The CPU must support AVX2.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn add_group_avx2(lanes: &mut [u8; LANES], offset: i16) {
    use core::arch::x86_64::{
        __m128i, __m256i, _mm256_add_epi16, _mm256_cvtepu8_epi16, _mm256_max_epi16,
        _mm256_min_epi16, _mm256_packus_epi16, _mm256_permute4x64_epi64, _mm256_set1_epi16,
        _mm256_setzero_si256, _mm256_storeu_si256, _mm_loadu_si128,
    };

    /// `_mm256_packus_epi16` works per 128-bit half, leaving the 64-bit quarters in the order
    /// 0, 2, 1, 3. This puts them back.
    const RESTORE_ORDER: i32 = 0b11_01_10_00;

    let pointer = lanes.as_mut_ptr();
    // SAFETY: `lanes` is exactly 32 bytes, we read two unaligned 16-byte halves and write back
    // one unaligned 32-byte vector.
    unsafe {
        let low = _mm_loadu_si128(pointer.cast::<__m128i>());
        let high = _mm_loadu_si128(pointer.add(16).cast::<__m128i>());

        let offset = _mm256_set1_epi16(offset);
        let floor = _mm256_setzero_si256();
        let ceiling = _mm256_set1_epi16(255);

        let low = _mm256_add_epi16(_mm256_cvtepu8_epi16(low), offset);
        let high = _mm256_add_epi16(_mm256_cvtepu8_epi16(high), offset);
        let low = _mm256_min_epi16(_mm256_max_epi16(low, floor), ceiling);
        let high = _mm256_min_epi16(_mm256_max_epi16(high, floor), ceiling);

        let packed = _mm256_packus_epi16(low, high);
        let ordered = _mm256_permute4x64_epi64::<RESTORE_ORDER>(packed);
        _mm256_storeu_si256(pointer.cast::<__m256i>(), ordered);
    }
}

#[expect(
    clippy::indexing_slicing,
    clippy::unwrap_used,
    reason = "They're just tests"
)]
