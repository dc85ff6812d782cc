//! Confirmation mask decoding

/// Whether the custodian at `bit_index` has signed, given a confirmation
/// mask.
///
/// Bits are 0-based, least-significant-bit first. Indexes at or beyond the
/// mask's width are simply unset, not an error.
pub fn has_signed(mask: u64, bit_index: u32) -> bool {
    mask.checked_shr(bit_index).map_or(false, |m| m & 1 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_shift_definition() {
        let masks = [0u64, 1, 2, 6, 0b1010_1010, u64::MAX, 1 << 63];
        for &mask in &masks {
            for i in 0..64 {
                assert_eq!(has_signed(mask, i), (mask >> i) & 1 == 1);
            }
        }
    }

    #[test]
    fn test_empty_mask() {
        for i in 0..64 {
            assert!(!has_signed(0, i));
        }
    }

    #[test]
    fn test_out_of_range_index_is_unset() {
        assert!(!has_signed(u64::MAX, 64));
        assert!(!has_signed(u64::MAX, 1000));
    }

    #[test]
    fn test_single_bits() {
        assert!(!has_signed(0b10, 0));
        assert!(has_signed(0b10, 1));
        assert!(has_signed(1 << 63, 63));
    }
}
