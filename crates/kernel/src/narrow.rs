//! The narrow-vector kernel. A separately maintained fast path that walks the raw buffer in one
//! go, ignoring rows entirely, 16 bytes at a time.
//!
//! Rather than widening, it picks a direction once up front: unsigned saturating add for positive
//! offsets, unsigned saturating subtract for negative ones. Both saturate at exactly the bounds we
//! want, so no further clamping is needed.

/// Bytes per vector step.
pub const LANES: usize = 16;

/// Apply the offset to every sample of a packed 3-channel buffer, in place.
///
/// # Safety
/// `data` must be valid for reads and writes of `width * height * 3` bytes, that product must not
/// overflow, and nothing else may access the buffer for the duration of the call.
pub unsafe fn brightness_raw(data: *mut u8, width: usize, height: usize, offset: i32) {
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The caller guarantees that the buffer size doesn't overflow"
    )]
    let len = width * height * usize::from(crate::SUPPORTED_CHANNELS);
    if offset == 0 || len == 0 {
        return;
    }

    #[expect(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        reason = "It's been clamped to 255"
    )]
    let magnitude = offset.unsigned_abs().min(255) as u8;
    let brighten = offset > 0;

    #[cfg(target_arch = "x86_64")]
    // SAFETY: Forwarded from the caller. SSE2 is part of the x86-64 baseline.
    unsafe {
        saturate_sse2(data, len, magnitude, brighten);
    }

    #[cfg(not(target_arch = "x86_64"))]
    // SAFETY: Forwarded from the caller.
    unsafe {
        saturate_bytewise(data, len, magnitude, brighten);
    }
}

/// # Safety
/// `data` must be valid for reads and writes of `len` bytes.
#[cfg(target_arch = "x86_64")]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "`index` never passes `len`, which the caller guarantees is addressable"
)]
unsafe fn saturate_sse2(data: *mut u8, len: usize, magnitude: u8, brighten: bool) {
    use core::arch::x86_64::{
        __m128i, _mm_adds_epu8, _mm_loadu_si128, _mm_set1_epi8, _mm_storeu_si128, _mm_subs_epu8,
    };

    let vector_len = len - len % LANES;
    let mut index = 0;

    // SAFETY: Every 16-byte access starts at `index <= vector_len - 16`, so stays inside `len`.
    // Loads and stores are unaligned.
    unsafe {
        let step = _mm_set1_epi8(i8::from_ne_bytes([magnitude]));
        if brighten {
            while index < vector_len {
                let cursor = data.add(index).cast::<__m128i>();
                _mm_storeu_si128(cursor, _mm_adds_epu8(_mm_loadu_si128(cursor), step));
                index += LANES;
            }
        } else {
            while index < vector_len {
                let cursor = data.add(index).cast::<__m128i>();
                _mm_storeu_si128(cursor, _mm_subs_epu8(_mm_loadu_si128(cursor), step));
                index += LANES;
            }
        }

        saturate_bytewise(data.add(vector_len), len - vector_len, magnitude, brighten);
    }
}

/// The tail, or everything on targets without a vector path.
///
/// # Safety
/// `data` must be valid for reads and writes of `len` bytes.
unsafe fn saturate_bytewise(data: *mut u8, len: usize, magnitude: u8, brighten: bool) {
    for index in 0..len {
        // SAFETY: `index < len`.
        unsafe {
            let sample = data.add(index);
            *sample = if brighten {
                (*sample).saturating_add(magnitude)
            } else {
                (*sample).saturating_sub(magnitude)
            };
        }
    }
}
