//! POCSAG transmit sequencer for SX127x radios in FSK packet mode.
//!
//! This module provides [`PagerDriver`], which streams a packed POCSAG
//! transmission into the 64-byte radio FIFO while the radio is already on air.
//! The radio reports progress only through `RegIrqFlags2`, so the driver polls
//! it: each wait is bounded by a timeout and can be cancelled through an
//! [`AbortSignal`].
//!
//! ## Sequence
//!
//! 1. write the payload length
//! 2. preload the FIFO with the first chunk and switch to TX
//! 3. each time `FifoLevel` clears, top the FIFO up with the next chunk
//! 4. once `PacketSent` is set, wait the tail delay and go back to standby
//!
//! Any failure after the first register write puts the radio back into
//! standby (best effort) before the error is returned.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal_mock::eh1::spi::Mock as SpiMock;
//! use pocsag_tx::driver::{PagerDriver, TransmitConfig};
//! use pocsag_tx::error::{EncodeError, Error};
//! use pocsag_tx::radio::Sx127x;
//!
//! # struct Spin;
//! # impl DelayNs for Spin {
//! #     fn delay_ns(&mut self, _ns: u32) {}
//! # }
//! # let spi = SpiMock::new(&[]);
//! let mut pager = PagerDriver::new(Sx127x::new(spi), Spin, TransmitConfig::default());
//!
//! // Validation happens before the radio is touched.
//! let result = pager.send(0, 0, "HELLO");
//! assert_eq!(result, Err(Error::Encode(EncodeError::InvalidAddress(0))));
//! # pager.release().0.release().done();
//! ```

use embedded_hal::delay::DelayNs;

use crate::consts::{DEFAULT_CHUNK_SIZE, POCSAG_MAX_PACKET_LEN, SX127X_FIFO_CAPACITY};
use crate::encoding::build_transmission;
use crate::error::{Error, Warning};
use crate::radio::registers::{
    IrqFlags2, OpMode, REG_FIFO, REG_IRQ_FLAGS2, REG_OP_MODE, REG_PAYLOAD_LENGTH,
};
use crate::radio::{RadioConfig, RegisterInterface, configure};
use crate::wait::{AbortSignal, NoAbort, PollPolicy, WaitError, WaitTarget, airtime_ms, block_until};

/// Factor applied to the expected on-air time when deriving wait timeouts.
pub const TIMEOUT_MARGIN: u32 = 2;
/// Default delay between two status polls, in microseconds.
pub const DEFAULT_POLL_INTERVAL_US: u32 = 1_000;
/// Default delay between `PacketSent` and the switch back to standby, in milliseconds.
pub const DEFAULT_TAIL_DELAY_MS: u32 = 100;

/// State of the transmit sequencer.
///
/// A transmission walks through
/// `Idle → Loaded → Transmitting → (Refilling ⇄ Transmitting)* → Draining → Idle`.
/// Every error path ends in [`Idle`](TxMode::Idle).
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TxMode {
    /// Radio in standby, nothing queued.
    #[default]
    Idle,
    /// Payload length and first chunk written, radio not yet in TX.
    Loaded,
    /// Radio in TX, draining the FIFO.
    Transmitting,
    /// Waiting for the FIFO to drop below the threshold before the next chunk.
    Refilling,
    /// All bytes are in the FIFO; waiting for the packet to finish.
    Draining,
}

/// Chunking, timing and timeout parameters of the transmit sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TransmitConfig {
    /// Largest FIFO write, in bytes.
    pub chunk_size: usize,
    /// Size of the radio FIFO, in bytes.
    pub fifo_capacity: usize,
    /// FIFO threshold programmed into the radio, in bytes.
    pub fifo_threshold: u8,
    /// Delay between two status polls, in microseconds.
    pub poll_interval_us: u32,
    /// How long to wait for the FIFO to drain to the threshold, in milliseconds.
    pub refill_timeout_ms: u32,
    /// How long to wait for the packet to finish once fully queued, in milliseconds.
    pub complete_timeout_ms: u32,
    /// Delay between `PacketSent` and the switch to standby, in milliseconds.
    pub tail_delay_ms: u32,
}

impl Default for TransmitConfig {
    fn default() -> Self {
        Self::for_radio(&RadioConfig::default())
    }
}

impl TransmitConfig {
    /// Derives the sequencer parameters from the radio settings.
    ///
    /// Both timeouts cover the preamble, since the first wait of a transmission
    /// starts while the preamble is still on air, and are scaled by
    /// [`TIMEOUT_MARGIN`].
    pub fn for_radio(radio: &RadioConfig) -> Self {
        let fifo_airtime = airtime_ms(radio.bitrate, radio.preamble_len, SX127X_FIFO_CAPACITY);
        let packet_airtime = airtime_ms(radio.bitrate, radio.preamble_len, POCSAG_MAX_PACKET_LEN);
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            fifo_capacity: SX127X_FIFO_CAPACITY,
            fifo_threshold: radio.fifo_threshold,
            poll_interval_us: DEFAULT_POLL_INTERVAL_US,
            refill_timeout_ms: fifo_airtime.saturating_mul(TIMEOUT_MARGIN),
            complete_timeout_ms: packet_airtime.saturating_mul(TIMEOUT_MARGIN),
            tail_delay_ms: DEFAULT_TAIL_DELAY_MS,
        }
    }

    /// Size of the chunk preloaded before switching to TX.
    pub fn first_chunk_len(&self) -> usize {
        self.chunk_size.min(self.fifo_capacity).max(1)
    }

    /// Size of each refill chunk.
    ///
    /// When `FifoLevel` clears the FIFO holds at most `fifo_threshold` bytes,
    /// so a refill never writes more than the remaining room.
    pub fn refill_chunk_len(&self) -> usize {
        let room = self
            .fifo_capacity
            .saturating_sub(usize::from(self.fifo_threshold));
        self.chunk_size.min(room).max(1)
    }
}

/// Outcome of a successful [`PagerDriver::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct SendReport {
    /// Number of POCSAG batches sent.
    pub batches: usize,
    /// Number of bytes streamed through the FIFO.
    pub bytes: usize,
    /// Set when the text had to be shortened.
    pub warning: Option<Warning>,
}

/// A POCSAG pager transmitter on top of an SX127x register interface.
///
/// The driver owns the register interface, a delay provider and an abort
/// signal. All operations block until the radio is back in standby.
///
/// ## Type Parameters
///
/// - `R`: the [`RegisterInterface`], typically [`Sx127x`](crate::radio::Sx127x)
/// - `D`: an [`embedded_hal::delay::DelayNs`] used between polls and for the tail delay
/// - `A`: an [`AbortSignal`] checked between polls, [`NoAbort`] by default
#[derive(Debug)]
pub struct PagerDriver<R, D, A = NoAbort> {
    /// Current state of the sequencer.
    pub mode: TxMode,
    radio: R,
    delay: D,
    abort: A,
    config: TransmitConfig,
    /// Transmissions that completed and returned the radio to standby.
    pub tx_good: u16,
    /// Transmissions that ended with a bus error, a timeout or an abort.
    pub tx_failed: u16,
}

impl<R, D> PagerDriver<R, D, NoAbort>
where
    R: RegisterInterface,
    D: DelayNs,
{
    /// Creates a driver whose waits can only end by completion or timeout.
    pub fn new(radio: R, delay: D, config: TransmitConfig) -> Self {
        Self::with_abort(radio, delay, NoAbort, config)
    }
}

impl<R, D, A> PagerDriver<R, D, A>
where
    R: RegisterInterface,
    D: DelayNs,
    A: AbortSignal,
{
    /// Creates a driver that also stops waiting once `abort` is raised.
    ///
    /// # Arguments
    /// - `radio`: the register interface
    /// - `delay`: delay provider for polling and the tail delay
    /// - `abort`: e.g. `&'static IsrAbortFlag` raised from an interrupt handler
    /// - `config`: chunking and timeout parameters
    pub fn with_abort(radio: R, delay: D, abort: A, config: TransmitConfig) -> Self {
        Self {
            mode: TxMode::Idle,
            radio,
            delay,
            abort,
            config,
            tx_good: 0,
            tx_failed: 0,
        }
    }

    /// Programs the radio for POCSAG transmission and leaves it in standby.
    ///
    /// The FIFO threshold used for refills is taken over from `radio_config`.
    pub fn init(&mut self, radio_config: &RadioConfig) -> Result<(), Error<R::Error>> {
        configure(&mut self.radio, radio_config).map_err(Error::Bus)?;
        self.config.fifo_threshold = radio_config.fifo_threshold;
        self.set_state(TxMode::Idle);
        Ok(())
    }

    /// Current sequencer parameters.
    pub fn config(&self) -> &TransmitConfig {
        &self.config
    }

    /// Shared access to the register interface.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Exclusive access to the register interface.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Releases the register interface, the delay provider and the abort signal.
    pub fn release(self) -> (R, D, A) {
        (self.radio, self.delay, self.abort)
    }

    /// Encodes a page, transmits it and reports what went on air.
    ///
    /// Parameters are validated before any register is touched.
    ///
    /// # Errors
    /// - [`Error::Encode`] for an invalid capcode, function code or empty text
    /// - any error of [`transmit`](Self::transmit)
    pub fn send(
        &mut self,
        capcode: u32,
        function: u8,
        text: &str,
    ) -> Result<SendReport, Error<R::Error>> {
        let transmission = build_transmission(capcode, function, text)?;
        let bytes = transmission.to_bytes();
        self.transmit(&bytes)?;
        Ok(SendReport {
            batches: transmission.batches(),
            bytes: bytes.len(),
            warning: transmission.warning(),
        })
    }

    /// Streams `bytes` through the radio FIFO as one fixed-length packet.
    ///
    /// Blocks until the packet is sent and the radio is back in standby.
    ///
    /// # Errors
    /// - [`Error::EmptyPayload`] / [`Error::PayloadTooLong`] before any bus traffic
    /// - [`Error::Bus`] if a register access fails
    /// - [`Error::Timeout`] / [`Error::Aborted`] if a wait did not complete
    pub fn transmit(&mut self, bytes: &[u8]) -> Result<(), Error<R::Error>> {
        if bytes.is_empty() {
            return Err(Error::EmptyPayload);
        }
        let length = u8::try_from(bytes.len()).map_err(|_| Error::PayloadTooLong(bytes.len()))?;

        match self.stream(bytes, length) {
            Ok(()) => {
                self.tx_good = self.tx_good.wrapping_add(1);
                Ok(())
            }
            Err(e) => {
                error!("transmission of {} bytes failed", bytes.len());
                // The radio may still be keyed up; the first error is the one reported.
                let _ = self.set_mode_standby();
                self.set_state(TxMode::Idle);
                self.tx_failed = self.tx_failed.wrapping_add(1);
                Err(e)
            }
        }
    }

    fn stream(&mut self, bytes: &[u8], length: u8) -> Result<(), Error<R::Error>> {
        self.radio
            .write_register(REG_PAYLOAD_LENGTH, &[length])
            .map_err(Error::Bus)?;

        let (first, mut rest) = bytes.split_at(self.config.first_chunk_len().min(bytes.len()));
        self.write_fifo(first)?;
        self.set_state(TxMode::Loaded);

        self.set_mode(OpMode::Tx)?;
        self.set_state(TxMode::Transmitting);

        let refill = self.config.refill_chunk_len();
        while !rest.is_empty() {
            self.set_state(TxMode::Refilling);
            self.wait_for(WaitTarget::FifoRefill)?;
            let (chunk, tail) = rest.split_at(refill.min(rest.len()));
            self.write_fifo(chunk)?;
            self.set_state(TxMode::Transmitting);
            rest = tail;
        }

        self.set_state(TxMode::Draining);
        self.wait_for(WaitTarget::PacketSent)?;
        self.delay.delay_ms(self.config.tail_delay_ms);
        self.set_mode_standby()
    }

    fn write_fifo(&mut self, chunk: &[u8]) -> Result<(), Error<R::Error>> {
        trace!("fifo <- {} bytes", chunk.len());
        self.radio.write_register(REG_FIFO, chunk).map_err(Error::Bus)
    }

    fn set_mode(&mut self, mode: OpMode) -> Result<(), Error<R::Error>> {
        trace!("op mode {:?}", mode);
        self.radio
            .write_register(REG_OP_MODE, &[mode.bits()])
            .map_err(Error::Bus)
    }

    fn set_mode_standby(&mut self) -> Result<(), Error<R::Error>> {
        self.set_mode(OpMode::Standby)?;
        self.set_state(TxMode::Idle);
        Ok(())
    }

    fn set_state(&mut self, mode: TxMode) {
        if self.mode != mode {
            trace!("{:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    fn wait_for(&mut self, target: WaitTarget) -> Result<(), Error<R::Error>> {
        let timeout_ms = match target {
            WaitTarget::FifoRefill => self.config.refill_timeout_ms,
            WaitTarget::PacketSent => self.config.complete_timeout_ms,
        };
        let policy = PollPolicy::from_timeout_ms(timeout_ms, self.config.poll_interval_us);
        let radio = &mut self.radio;
        block_until(&mut self.delay, &self.abort, policy, || {
            let flags = radio
                .read_register(REG_IRQ_FLAGS2)
                .map_err(nb::Error::Other)?;
            if target_reached(target, IrqFlags2::from_bits_truncate(flags)) {
                Ok(())
            } else {
                Err(nb::Error::WouldBlock)
            }
        })
        .map_err(|e| match e {
            WaitError::TimedOut => {
                error!("timed out waiting for {}", target);
                Error::Timeout(target)
            }
            WaitError::Aborted => {
                warn!("aborted while waiting for {}", target);
                Error::Aborted(target)
            }
            WaitError::Other(e) => Error::Bus(e),
        })
    }
}

fn target_reached(target: WaitTarget, flags: IrqFlags2) -> bool {
    match target {
        WaitTarget::FifoRefill => !flags.contains(IrqFlags2::FIFO_LEVEL),
        WaitTarget::PacketSent => flags.contains(IrqFlags2::PACKET_SENT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use crate::radio::Sx127x;
    use crate::wait::IsrAbortFlag;
    use core::convert::Infallible;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[derive(Debug, Default)]
    struct CountingDelay {
        calls: u32,
        total_us: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls += 1;
            self.total_us += u64::from(ns) / 1_000;
        }
    }

    /// Register-level model of the FIFO: every status read while in TX sends
    /// `drain_per_poll` bytes.
    #[derive(Debug)]
    struct SimRadio {
        drain_per_poll: usize,
        reports_sent: bool,
        threshold: usize,
        payload_len: usize,
        fifo: usize,
        sent: usize,
        transmitting: bool,
        status_reads: u32,
        chunks: Vec<usize>,
        modes: Vec<u8>,
        writes: u32,
    }

    impl SimRadio {
        fn new(drain_per_poll: usize) -> Self {
            Self {
                drain_per_poll,
                reports_sent: true,
                threshold: 30,
                payload_len: 0,
                fifo: 0,
                sent: 0,
                transmitting: false,
                status_reads: 0,
                chunks: Vec::new(),
                modes: Vec::new(),
                writes: 0,
            }
        }
    }

    impl RegisterInterface for SimRadio {
        type Error = Infallible;

        fn write_register(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
            self.writes += 1;
            match address {
                REG_PAYLOAD_LENGTH => self.payload_len = usize::from(data[0]),
                REG_FIFO => {
                    self.fifo += data.len();
                    assert!(self.fifo <= SX127X_FIFO_CAPACITY, "FIFO overrun");
                    self.chunks.push(data.len());
                }
                REG_OP_MODE => {
                    self.modes.push(data[0]);
                    self.transmitting = data[0] == OpMode::Tx.bits();
                }
                _ => {}
            }
            Ok(())
        }

        fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
            assert_eq!(address, REG_IRQ_FLAGS2);
            self.status_reads += 1;
            if self.transmitting {
                let n = self.drain_per_poll.min(self.fifo);
                self.fifo -= n;
                self.sent += n;
            }
            let mut flags = IrqFlags2::empty();
            if self.fifo > self.threshold {
                flags |= IrqFlags2::FIFO_LEVEL;
            }
            if self.reports_sent && self.payload_len > 0 && self.sent == self.payload_len {
                flags |= IrqFlags2::PACKET_SENT;
            }
            Ok(flags.bits())
        }
    }

    fn test_config() -> TransmitConfig {
        TransmitConfig {
            refill_timeout_ms: 50,
            complete_timeout_ms: 50,
            ..TransmitConfig::default()
        }
    }

    #[test]
    fn test_default_config_matches_radio_defaults() {
        let config = TransmitConfig::default();
        assert_eq!(config.chunk_size, 60);
        assert_eq!(config.fifo_capacity, 64);
        assert_eq!(config.fifo_threshold, 30);
        assert_eq!(config.first_chunk_len(), 60);
        assert_eq!(config.refill_chunk_len(), 34);
        assert_eq!(config.refill_timeout_ms, 3_254);
        assert_eq!(config.complete_timeout_ms, 4_214);
        assert_eq!(config.tail_delay_ms, 100);
    }

    #[test]
    fn test_chunk_lengths_never_exceed_fifo() {
        let config = TransmitConfig {
            chunk_size: 100,
            fifo_threshold: 0,
            ..TransmitConfig::default()
        };
        assert_eq!(config.first_chunk_len(), 64);
        assert_eq!(config.refill_chunk_len(), 64);
    }

    #[test]
    fn test_one_batch_is_sent_in_two_chunks() {
        let mut driver = PagerDriver::new(SimRadio::new(8), CountingDelay::default(), test_config());
        assert_eq!(driver.transmit(&[0xaa; 68]), Ok(()));

        let (radio, delay, _) = driver.release();
        assert_eq!(radio.chunks, vec![60, 8]);
        assert_eq!(radio.modes, vec![OpMode::Tx.bits(), OpMode::Standby.bits()]);
        assert_eq!(radio.sent, 68);
        assert!(delay.total_us >= 100_000);
    }

    #[test]
    fn test_two_batches_are_refilled_below_threshold() {
        let mut driver = PagerDriver::new(SimRadio::new(8), CountingDelay::default(), test_config());
        assert_eq!(driver.transmit(&[0x55; 136]), Ok(()));
        assert_eq!(driver.mode, TxMode::Idle);
        assert_eq!(driver.tx_good, 1);
        assert_eq!(driver.tx_failed, 0);

        let (radio, _, _) = driver.release();
        assert_eq!(radio.chunks, vec![60, 34, 34, 8]);
        assert_eq!(radio.sent, 136);
        assert_eq!(radio.payload_len, 136);
    }

    #[test]
    fn test_short_payload_skips_refill() {
        let mut driver = PagerDriver::new(SimRadio::new(8), CountingDelay::default(), test_config());
        assert_eq!(driver.transmit(&[1, 2, 3, 4]), Ok(()));
        let (radio, _, _) = driver.release();
        assert_eq!(radio.chunks, vec![4]);
    }

    #[test]
    fn test_stuck_fifo_times_out_and_returns_to_standby() {
        let mut driver = PagerDriver::new(SimRadio::new(0), CountingDelay::default(), test_config());
        assert_eq!(
            driver.transmit(&[0; 68]),
            Err(Error::Timeout(WaitTarget::FifoRefill))
        );
        assert_eq!(driver.mode, TxMode::Idle);
        assert_eq!(driver.tx_failed, 1);
        assert_eq!(driver.tx_good, 0);

        let (radio, delay, _) = driver.release();
        assert_eq!(radio.status_reads, 50);
        assert_eq!(delay.calls, 49);
        assert_eq!(radio.modes.last(), Some(&OpMode::Standby.bits()));
        assert_eq!(radio.chunks, vec![60]);
    }

    #[test]
    fn test_missing_packet_sent_times_out() {
        let mut radio = SimRadio::new(8);
        radio.reports_sent = false;
        let mut driver = PagerDriver::new(radio, CountingDelay::default(), test_config());
        assert_eq!(
            driver.transmit(&[0; 40]),
            Err(Error::Timeout(WaitTarget::PacketSent))
        );
        assert_eq!(driver.mode, TxMode::Idle);
        let (radio, _, _) = driver.release();
        assert_eq!(radio.modes, vec![OpMode::Tx.bits(), OpMode::Standby.bits()]);
    }

    #[test]
    fn test_raised_abort_stops_the_wait() {
        let abort = IsrAbortFlag::new();
        abort.raise();
        let mut driver =
            PagerDriver::with_abort(SimRadio::new(8), CountingDelay::default(), &abort, test_config());
        assert_eq!(
            driver.transmit(&[0; 68]),
            Err(Error::Aborted(WaitTarget::FifoRefill))
        );
        assert_eq!(driver.mode, TxMode::Idle);
        assert_eq!(driver.tx_failed, 1);
        let (radio, _, _) = driver.release();
        assert_eq!(radio.status_reads, 0);
        assert_eq!(radio.modes.last(), Some(&OpMode::Standby.bits()));
    }

    #[test]
    fn test_invalid_payloads_touch_no_register() {
        let mut driver = PagerDriver::new(SimRadio::new(8), CountingDelay::default(), test_config());
        assert_eq!(driver.transmit(&[]), Err(Error::EmptyPayload));
        assert_eq!(driver.transmit(&[0; 256]), Err(Error::PayloadTooLong(256)));
        assert_eq!(driver.tx_failed, 0);
        assert_eq!(driver.radio().writes, 0);
    }

    #[test]
    fn test_send_rejects_before_bus_traffic() {
        let mut driver = PagerDriver::new(SimRadio::new(8), CountingDelay::default(), test_config());
        assert_eq!(
            driver.send(0, 0, "HI"),
            Err(Error::Encode(EncodeError::InvalidAddress(0)))
        );
        assert_eq!(
            driver.send(1_000_003, 4, "HI"),
            Err(Error::Encode(EncodeError::InvalidFunction(4)))
        );
        assert_eq!(
            driver.send(1_000_003, 0, ""),
            Err(Error::Encode(EncodeError::NoText))
        );
        assert_eq!(driver.radio().writes, 0);
    }

    #[test]
    fn test_send_over_spi() {
        let bytes = build_transmission(1_000_003, 0, "HI").unwrap().to_bytes();
        assert_eq!(bytes.len(), 68);

        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xb2]),
            SpiTransaction::write_vec(vec![68]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x80]),
            SpiTransaction::write_vec(bytes[..60].to_vec()),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x81]),
            SpiTransaction::write_vec(vec![0x03]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x3f]),
            SpiTransaction::read_vec(vec![0x00]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x80]),
            SpiTransaction::write_vec(bytes[60..].to_vec()),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x3f]),
            SpiTransaction::read_vec(vec![0x08]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x81]),
            SpiTransaction::write_vec(vec![0x01]),
            SpiTransaction::transaction_end(),
        ];
        let radio = Sx127x::new(SpiMock::new(&expectations));
        let mut driver = PagerDriver::new(radio, CountingDelay::default(), TransmitConfig::default());

        let report = driver.send(1_000_003, 0, "HI").unwrap();
        assert_eq!(
            report,
            SendReport {
                batches: 1,
                bytes: 68,
                warning: None,
            }
        );
        assert_eq!(driver.tx_good, 1);

        let (radio, delay, _) = driver.release();
        assert_eq!(delay.total_us, 100_000);
        radio.release().done();
    }

    #[test]
    fn test_init_programs_radio_and_threshold() {
        let mut driver = PagerDriver::new(SimRadio::new(8), CountingDelay::default(), test_config());
        let radio_config = RadioConfig {
            fifo_threshold: 20,
            ..RadioConfig::default()
        };
        assert_eq!(driver.init(&radio_config), Ok(()));
        assert_eq!(driver.config().fifo_threshold, 20);
        assert_eq!(driver.config().refill_chunk_len(), 44);
        assert_eq!(driver.radio().modes, vec![OpMode::Sleep.bits(), OpMode::Standby.bits()]);
    }
}
