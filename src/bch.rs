//! BCH(31,21) codeword coder with an appended even-parity bit.
//!
//! Every POCSAG codeword is 32 bits wide:
//!
//! | Bits   | Content                                   |
//! |--------|-------------------------------------------|
//! | 31     | type flag (0 = address, 1 = message)      |
//! | 30..11 | 20 information bits                       |
//! | 10..1  | BCH check bits                            |
//! | 0      | even parity over the whole word           |
//!
//! The check bits are the remainder of a binary polynomial division by
//! [`POCSAG_GENERATOR`]. Receivers reject any word whose check bits or parity
//! do not match, so the division must be bit-exact.

use crate::consts::{POCSAG_GENERATOR, POCSAG_PAYLOAD_BITS};

const TYPE_FLAG: u32 = 0x8000_0000;
const DATA_MASK: u32 = 0xffff_f800;
const CHECK_MASK: u32 = 0x0000_07fe;

/// Builds a complete codeword from a 21-bit payload.
///
/// # Arguments
/// - `message`: `true` for a message (text) codeword; forces bit 31 high
/// - `payload`: information field, must already fit in 21 bits
///
/// # Returns
/// The 32-bit codeword including check bits and parity.
pub fn encode_codeword(message: bool, payload: u32) -> u32 {
    let mut cw = payload << 11;
    if message {
        cw |= TYPE_FLAG;
    }
    cw |= bch_check_bits(cw);
    if !has_even_parity(cw) {
        cw |= 1;
    }
    cw
}

/// Computes the BCH check bits for the information bits of `cw`.
///
/// Only bits 31..11 of `cw` take part in the division. The result is aligned
/// to bits 10..1 so it can be OR-ed straight into the codeword.
pub fn bch_check_bits(cw: u32) -> u32 {
    let mut reg = cw & DATA_MASK;
    for _ in 0..POCSAG_PAYLOAD_BITS {
        if reg & TYPE_FLAG != 0 {
            reg ^= POCSAG_GENERATOR;
        }
        reg <<= 1;
    }
    reg >> 21
}

/// Returns `true` when `cw` has an even number of set bits.
pub fn has_even_parity(cw: u32) -> bool {
    cw.count_ones() % 2 == 0
}

/// Checks both the BCH check bits and the parity bit of a received or generated codeword.
pub fn is_valid_codeword(cw: u32) -> bool {
    cw & CHECK_MASK == bch_check_bits(cw) && has_even_parity(cw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::POCSAG_SYNC_CODEWORD;

    #[test]
    fn test_zero_payload_is_all_zero() {
        assert_eq!(encode_codeword(false, 0), 0);
    }

    #[test]
    fn test_known_codewords() {
        assert_eq!(encode_codeword(false, 1), 0x0000_0ed3);
        assert_eq!(encode_codeword(true, 0), 0x8000_0769);
        assert_eq!(encode_codeword(false, 0x7a120), 0x3d09_04eb);
        assert_eq!(encode_codeword(false, 0x1f_ffff), 0xffff_ffff);
        assert_eq!(encode_codeword(true, 0xf_ffff), 0xffff_ffff);
    }

    #[test]
    fn test_sync_codeword_is_a_valid_codeword() {
        assert_eq!(encode_codeword(false, POCSAG_SYNC_CODEWORD >> 11), POCSAG_SYNC_CODEWORD);
        assert!(is_valid_codeword(POCSAG_SYNC_CODEWORD));
    }

    #[test]
    fn test_message_flag_sets_msb() {
        for payload in [0u32, 1, 0x5_5555, 0xf_ffff] {
            assert_ne!(encode_codeword(true, payload) & TYPE_FLAG, 0);
        }
        assert_eq!(encode_codeword(false, 0xf_ffff) & TYPE_FLAG, 0);
    }

    /// Long division of the 21 information bits by the generator, one bit at a time.
    fn reference_check_bits(cw: u32) -> u32 {
        let mut remainder: u32 = 0;
        for bit in (11..32).rev() {
            remainder = (remainder << 1) | ((cw >> bit) & 1);
            if remainder & (1 << 10) != 0 {
                remainder ^= 0x769;
            }
        }
        for _ in 0..10 {
            remainder <<= 1;
            if remainder & (1 << 10) != 0 {
                remainder ^= 0x769;
            }
        }
        remainder << 1
    }

    #[test]
    fn test_check_bits_match_long_division() {
        let mut payload: u32 = 0;
        while payload <= 0x1f_ffff {
            let cw = encode_codeword(false, payload);
            assert_eq!(cw & CHECK_MASK, reference_check_bits(cw), "{payload:#x}");
            assert_eq!(bch_check_bits(cw), reference_check_bits(cw));
            payload += 0x0ff1;
        }
        assert_eq!(reference_check_bits(POCSAG_SYNC_CODEWORD), POCSAG_SYNC_CODEWORD & CHECK_MASK);
    }

    #[test]
    fn test_codewords_have_even_parity_and_matching_check_bits() {
        let mut payload: u32 = 0;
        while payload <= 0x1f_ffff {
            for message in [false, true] {
                let cw = encode_codeword(message, payload);
                assert!(has_even_parity(cw), "odd parity for {payload:#x}");
                assert_eq!(cw & CHECK_MASK, bch_check_bits(cw & DATA_MASK));
                assert!(is_valid_codeword(cw));
            }
            payload += 0x1235;
        }
    }

    #[test]
    fn test_corrupted_codeword_is_rejected() {
        let cw = encode_codeword(false, 0x7a120);
        assert!(!is_valid_codeword(cw ^ 0x0010_0000));
        assert!(!is_valid_codeword(cw ^ 1));
    }
}
