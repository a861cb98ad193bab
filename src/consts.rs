//! Constants used across the POCSAG encoder and transmit sequencer.
//!
//! This module defines the protocol-wide words, field limits and buffer sizes
//! shared by the codeword coder, the message encoder and the driver.
//!
//! ## Key Concepts
//!
//! - **Codewords**: 32-bit units; every transmission is a sequence of them.
//! - **Batches**: one sync codeword followed by 8 frames of 2 codewords.
//! - **Capcodes**: 21-bit pager addresses; the low 3 bits select the frame.
//! - **Text**: 7-bit characters packed 20 bits per message codeword.
//! - **Buffer Sizing**: derived from the two-batch maximum so that fixed-capacity
//!   `heapless` storage always suffices.

/// Frame synchronisation codeword sent at the start of every batch.
pub const POCSAG_SYNC_CODEWORD: u32 = 0x7cd2_15d8;

/// Filler codeword occupying every slot not carrying address or text.
///
/// This is not the CCIR idle word (`0x7a89_c197`) and does not pass
/// [`is_valid_codeword`](crate::bch::is_valid_codeword); pagers ignore it either way.
pub const POCSAG_IDLE_CODEWORD: u32 = 0x7ac9_c197;

/// Generator polynomial of the BCH(31,21) code, aligned to bit 31.
pub const POCSAG_GENERATOR: u32 = 0xed20_0000;

/// Number of bits in the information field of a codeword.
pub const POCSAG_PAYLOAD_BITS: u8 = 21;

/// Number of text bits carried by one message codeword.
pub const POCSAG_TEXT_BITS_PER_CODEWORD: u8 = 20;

/// Number of bits used to transmit a single text character.
pub const POCSAG_BITS_PER_CHAR: u8 = 7;

/// End-of-transmission character appended to every message.
pub const POCSAG_EOT: u8 = 0x04;

/// Codewords per frame.
pub const POCSAG_CODEWORDS_PER_FRAME: usize = 2;

/// Frames per batch.
pub const POCSAG_FRAMES_PER_BATCH: usize = 8;

/// Codewords per batch, not counting the leading sync codeword.
pub const POCSAG_CODEWORDS_PER_BATCH: usize = POCSAG_CODEWORDS_PER_FRAME * POCSAG_FRAMES_PER_BATCH;

/// Maximum number of batches in one transmission.
pub const POCSAG_MAX_BATCHES: usize = 2;

/// Size of the working codeword array before sync words are inserted.
pub const POCSAG_CODEWORD_SLOTS: usize = POCSAG_CODEWORDS_PER_BATCH * POCSAG_MAX_BATCHES;

/// Maximum number of codewords in a transmission, sync words included.
pub const POCSAG_MAX_CODEWORDS: usize = (POCSAG_CODEWORDS_PER_BATCH + 1) * POCSAG_MAX_BATCHES;

/// Bytes emitted per codeword by the packer.
pub const POCSAG_BYTES_PER_CODEWORD: usize = 4;

/// Size (in bytes) of a packed single-batch transmission.
pub const POCSAG_BATCH_BYTES: usize = (POCSAG_CODEWORDS_PER_BATCH + 1) * POCSAG_BYTES_PER_CODEWORD;

/// Maximum size (in bytes) of a packed transmission.
pub const POCSAG_MAX_PACKET_LEN: usize = POCSAG_MAX_CODEWORDS * POCSAG_BYTES_PER_CODEWORD;

/// Lowest valid capcode.
pub const CAPCODE_MIN: u32 = 1;

/// Highest valid capcode (21 bits).
pub const CAPCODE_MAX: u32 = 0x1f_ffff;

/// Highest valid function code.
pub const FUNCTION_MAX: u8 = 3;

/// Maximum number of characters sent in one page.
///
/// Longer text is truncated to this length; the EOT character is added on top.
pub const MAX_TEXT_LEN: usize = 39;

/// Default number of bytes written to the transceiver FIFO per transaction.
pub const DEFAULT_CHUNK_SIZE: usize = 60;

/// FIFO capacity of the SX1276/SX1278 in FSK packet mode.
pub const SX127X_FIFO_CAPACITY: usize = 64;
