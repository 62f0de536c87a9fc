//! Alignment arithmetic helpers

/// Aligns a value up to the nearest multiple of alignment
///
/// # Examples
/// ```
/// use stackalloc::utils::align_up;
///
/// assert_eq!(align_up(7, 8), 8);
/// assert_eq!(align_up(8, 8), 8);
/// assert_eq!(align_up(9, 8), 16);
/// ```
#[inline(always)]
pub const fn align_up(value: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// Aligns a value down to the nearest multiple of alignment
///
/// # Examples
/// ```
/// use stackalloc::utils::align_down;
///
/// assert_eq!(align_down(7, 8), 0);
/// assert_eq!(align_down(8, 8), 8);
/// assert_eq!(align_down(9, 8), 8);
/// ```
#[inline(always)]
pub const fn align_down(value: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    value & !(alignment - 1)
}

/// Checks whether a value is a multiple of alignment
///
/// # Examples
/// ```
/// use stackalloc::utils::is_aligned;
///
/// assert!(is_aligned(16, 8));
/// assert!(!is_aligned(12, 8));
/// ```
#[inline(always)]
pub const fn is_aligned(value: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    value & (alignment - 1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_is_idempotent_on_aligned_values() {
        for align in [1usize, 2, 4, 8, 16, 64] {
            for value in (0..256).step_by(align) {
                assert_eq!(align_up(value, align), value);
            }
        }
    }

    #[test]
    fn align_up_rounds_to_next_multiple() {
        assert_eq!(align_up(1, 4), 4);
        assert_eq!(align_up(3, 4), 4);
        assert_eq!(align_up(5, 4), 8);
        assert_eq!(align_up(0, 4), 0);
    }

    #[test]
    fn align_down_never_exceeds_value() {
        for value in 0..128usize {
            for align in [1usize, 2, 4, 8, 16] {
                assert!(align_down(value, align) <= value);
                assert!(is_aligned(align_down(value, align), align));
            }
        }
    }
}
