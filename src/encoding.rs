//! POCSAG message encoding and byte packing.
//!
//! This module turns a `(capcode, function, text)` triple into a complete
//! [`Transmission`] and serialises it into the byte stream the transceiver
//! FIFO expects.
//!
//! ## Message Layout
//!
//! A transmission is one or two batches. Each batch starts with the sync
//! codeword and holds 8 frames of 2 codewords. The address codeword goes into
//! frame `capcode % 8` of the first batch, the text codewords follow it
//! directly and may spill into the second batch. Every other slot keeps the
//! idle codeword.
//!
//! ## Text Packing
//!
//! Each character contributes its low 7 bits, least significant bit first,
//! followed by an EOT character. The bit string is cut into 20-bit groups, one
//! per message codeword. Twenty alternating filler bits, starting with the
//! complement of the last text bit, are appended and the stream is cut back
//! to a whole number of groups: a partial last group is completed, and text
//! that ends on a group boundary gets one full filler codeword.
//!
//! ## Functions
//!
//! - [`build_transmission`]: Validates the inputs and assembles the codewords
//! - [`pack_codewords`]: Packs codewords into inverted, MSB-first bytes
//! - [`Transmission::to_bytes`]: Packs a whole transmission into a buffer

use heapless::Vec;

use crate::bch::encode_codeword;
use crate::consts::{
    CAPCODE_MAX, CAPCODE_MIN, FUNCTION_MAX, MAX_TEXT_LEN, POCSAG_BITS_PER_CHAR,
    POCSAG_BYTES_PER_CODEWORD, POCSAG_CODEWORD_SLOTS, POCSAG_CODEWORDS_PER_BATCH,
    POCSAG_CODEWORDS_PER_FRAME, POCSAG_EOT, POCSAG_FRAMES_PER_BATCH, POCSAG_IDLE_CODEWORD,
    POCSAG_MAX_CODEWORDS, POCSAG_MAX_PACKET_LEN, POCSAG_SYNC_CODEWORD,
    POCSAG_TEXT_BITS_PER_CODEWORD,
};
use crate::error::{EncodeError, Warning};

/// A fully encoded page, ready to be packed and transmitted.
///
/// Holds 17 codewords (one batch) or 34 codewords (two batches), sync words
/// included. Built only through [`build_transmission`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Transmission {
    codewords: Vec<u32, POCSAG_MAX_CODEWORDS>,
    warning: Option<Warning>,
}

impl Transmission {
    /// All codewords in transmission order, sync words included.
    pub fn codewords(&self) -> &[u32] {
        &self.codewords
    }

    /// Number of batches (1 or 2).
    pub fn batches(&self) -> usize {
        self.codewords.len() / (POCSAG_CODEWORDS_PER_BATCH + 1)
    }

    /// Warning raised while encoding, if any.
    pub fn warning(&self) -> Option<Warning> {
        self.warning
    }

    /// Length in bytes of the packed transmission.
    pub fn packed_len(&self) -> usize {
        self.codewords.len() * POCSAG_BYTES_PER_CODEWORD
    }

    /// Packs the transmission into the byte stream written to the radio FIFO.
    pub fn to_bytes(&self) -> Vec<u8, POCSAG_MAX_PACKET_LEN> {
        let mut bytes = Vec::new();
        for cw in &self.codewords {
            let _ = bytes.extend_from_slice(&pack_codeword(*cw));
        }
        bytes
    }
}

/// Converts one codeword into 4 bytes, MSB first, every bit inverted.
///
/// The SX127x FSK polarity is the opposite of the POCSAG convention, so the
/// inversion makes the radio emit the correct deviation for each bit.
pub fn pack_codeword(cw: u32) -> [u8; 4] {
    (!cw).to_be_bytes()
}

/// Packs a slice of codewords into `output`.
///
/// # Arguments
/// - `&[u32]` : The codewords
/// - `&mut [u8]` : The output buffer
///
/// # Returns
/// The number of bytes written. Codewords that no longer fit in `output` are skipped.
pub fn pack_codewords(input: &[u32], output: &mut [u8]) -> usize {
    let mut written = 0;
    for (cw, out) in input
        .iter()
        .zip(output.chunks_exact_mut(POCSAG_BYTES_PER_CODEWORD))
    {
        out.copy_from_slice(&pack_codeword(*cw));
        written += POCSAG_BYTES_PER_CODEWORD;
    }
    written
}

/// Accumulates text bits and emits message codewords into the slot array.
struct TextPacker<'a> {
    slots: &'a mut [u32; POCSAG_CODEWORD_SLOTS],
    next: usize,
    group: u32,
    bits: u8,
    last_bit: bool,
}

impl<'a> TextPacker<'a> {
    fn new(slots: &'a mut [u32; POCSAG_CODEWORD_SLOTS], first: usize) -> Self {
        Self {
            slots,
            next: first,
            group: 0,
            bits: 0,
            last_bit: false,
        }
    }

    fn push_char(&mut self, c: u8) {
        // Characters go out LSB first
        for i in 0..POCSAG_BITS_PER_CHAR {
            self.push_bit(c & (1 << i) != 0);
        }
    }

    fn push_bit(&mut self, bit: bool) {
        self.group = (self.group << 1) | u32::from(bit);
        self.bits += 1;
        self.last_bit = bit;
        if self.bits == POCSAG_TEXT_BITS_PER_CODEWORD {
            self.slots[self.next] = encode_codeword(true, self.group);
            self.next += 1;
            self.group = 0;
            self.bits = 0;
        }
    }

    /// Appends one group of alternating filler and returns the slot index of
    /// the last codeword written.
    ///
    /// Only the bits needed to complete the current group are kept, so text
    /// that already ends on a group boundary gets a whole filler codeword.
    fn finish(mut self) -> usize {
        let mut fill = !self.last_bit;
        for _ in 0..POCSAG_TEXT_BITS_PER_CODEWORD {
            self.push_bit(fill);
            fill = !fill;
            if self.bits == 0 {
                break;
            }
        }
        self.next - 1
    }
}

/// Builds the complete POCSAG transmission for one page.
///
/// # Arguments
/// - `capcode`: pager address, `1..=0x1FFFFF`
/// - `function`: function code, `0..=3`
/// - `text`: message text; only the low 7 bits of each character are sent
///
/// # Returns
/// The [`Transmission`]. Text of 40 characters or more is cut to the first
/// [`MAX_TEXT_LEN`] characters and the transmission carries
/// [`Warning::Truncated`].
///
/// # Errors
/// - [`EncodeError::InvalidAddress`] for a capcode outside `1..=0x1FFFFF`
/// - [`EncodeError::InvalidFunction`] for a function code above 3
/// - [`EncodeError::NoText`] for empty text
pub fn build_transmission(
    capcode: u32,
    function: u8,
    text: &str,
) -> Result<Transmission, EncodeError> {
    if !(CAPCODE_MIN..=CAPCODE_MAX).contains(&capcode) {
        return Err(EncodeError::InvalidAddress(capcode));
    }
    if function > FUNCTION_MAX {
        return Err(EncodeError::InvalidFunction(function));
    }
    if text.is_empty() {
        return Err(EncodeError::NoText);
    }

    let char_count = text.chars().count();
    let warning = if char_count > MAX_TEXT_LEN {
        warn!("text truncated to {} characters", MAX_TEXT_LEN);
        Some(Warning::Truncated {
            original_len: char_count,
        })
    } else {
        None
    };

    let mut slots = [POCSAG_IDLE_CODEWORD; POCSAG_CODEWORD_SLOTS];

    // Address: upper 18 capcode bits followed by the 2 function bits
    let frame = (capcode as usize) % POCSAG_FRAMES_PER_BATCH;
    let address_slot = frame * POCSAG_CODEWORDS_PER_FRAME;
    let address_payload = ((capcode >> 3) << 2) | u32::from(function);
    slots[address_slot] = encode_codeword(false, address_payload);

    let mut packer = TextPacker::new(&mut slots, address_slot + 1);
    for c in text.chars().take(MAX_TEXT_LEN) {
        packer.push_char((u32::from(c) & 0x7f) as u8);
    }
    packer.push_char(POCSAG_EOT);
    let last_slot = packer.finish();

    let batches = if last_slot >= POCSAG_CODEWORDS_PER_BATCH {
        2
    } else {
        1
    };

    let mut codewords = Vec::new();
    for batch in slots.chunks_exact(POCSAG_CODEWORDS_PER_BATCH).take(batches) {
        let _ = codewords.push(POCSAG_SYNC_CODEWORD);
        let _ = codewords.extend_from_slice(batch);
    }

    debug!(
        "capcode {} function {}: {} batch(es), {} codewords",
        capcode,
        function,
        batches,
        codewords.len()
    );

    Ok(Transmission { codewords, warning })
}
