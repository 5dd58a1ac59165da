//! Handshake-driven streaming of the animation buffer to the booster.
//!
//! The booster latches one channel byte per strobe and signals completion
//! with a handshake. Every event (the kickoff or a handshake) emits exactly
//! one byte, in the order green, red, blue, white per LED, every LED of a
//! panel repeating the panel's color, panels in increasing order. The event
//! after the last byte terminates the sweep without emitting anything.

use crate::BoosterPort;
use crate::color::{BLACK, ColorChannel, Rgbw};
use crate::geometry::Geometry;

/// Bit pattern presented on the booster's eight data lines
///
/// The lines are split over two ports: the upper nibble on one, the lower
/// nibble on the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataLines {
    /// Upper nibble, bits 4-7
    pub high: u8,
    /// Lower nibble, bits 0-3
    pub low: u8,
}

impl DataLines {
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            high: byte & 0xF0,
            low: byte & 0x0F,
        }
    }

    /// Byte the booster reassembles from both ports
    pub const fn byte(self) -> u8 {
        self.high | self.low
    }
}

/// Error returned when a sweep cannot be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepError {
    /// A sweep is already running
    Busy,
}

/// Result of servicing one handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// A channel byte was emitted
    Sent(u8),
    /// The terminating event of a sweep; nothing emitted
    Finished,
    /// No sweep was running; the event was ignored
    Ignored,
}

/// Progress through the current sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitCursor {
    /// Next channel to emit
    pub channel: ColorChannel,
    /// LED within the current panel
    pub led: usize,
    /// Current panel
    pub panel: usize,
    /// The last byte of the sweep has been emitted
    pub last_led_written: bool,
    /// A sweep is running
    pub in_progress: bool,
}

impl TransmitCursor {
    pub const IDLE: Self = Self {
        channel: ColorChannel::Green,
        led: 0,
        panel: 0,
        last_led_written: false,
        in_progress: false,
    };
}

impl Default for TransmitCursor {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Sweep state machine owning the booster port
pub struct Transmitter<P: BoosterPort, const PANELS: usize, const LEDS_PER_PANEL: usize> {
    port: P,
    cursor: TransmitCursor,
}

impl<P: BoosterPort, const PANELS: usize, const LEDS_PER_PANEL: usize>
    Transmitter<P, PANELS, LEDS_PER_PANEL>
{
    pub const fn new(port: P) -> Self {
        let () = Geometry::<PANELS, LEDS_PER_PANEL, PANELS>::CHECK;
        Self {
            port,
            cursor: TransmitCursor::IDLE,
        }
    }

    pub const fn cursor(&self) -> TransmitCursor {
        self.cursor
    }

    pub const fn is_sweeping(&self) -> bool {
        self.cursor.in_progress
    }

    pub const fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Start a sweep and emit its first byte
    ///
    /// Panel `i` is read from `frame[i + offset]`. Refused while a sweep is
    /// running, leaving the cursor untouched.
    pub fn on_kickoff(&mut self, frame: &[Rgbw], offset: usize) -> Result<(), SweepError> {
        if self.cursor.in_progress {
            trace!("kickoff refused, sweep in progress");
            return Err(SweepError::Busy);
        }

        self.cursor = TransmitCursor {
            in_progress: true,
            ..TransmitCursor::IDLE
        };
        self.step(frame, offset);
        Ok(())
    }

    /// Service a handshake from the booster
    pub fn on_handshake(&mut self, frame: &[Rgbw], offset: usize) -> HandshakeOutcome {
        if !self.cursor.in_progress {
            trace!("stray handshake while idle");
            return HandshakeOutcome::Ignored;
        }
        self.step(frame, offset)
    }

    fn step(&mut self, frame: &[Rgbw], offset: usize) -> HandshakeOutcome {
        let cursor = &mut self.cursor;

        if cursor.last_led_written {
            *cursor = TransmitCursor::IDLE;
            trace!("sweep finished");
            return HandshakeOutcome::Finished;
        }

        let color = frame.get(cursor.panel + offset).copied().unwrap_or(BLACK);
        let byte = cursor.channel.of(color);
        self.port.write_lines(DataLines::from_byte(byte));
        self.port.strobe();

        cursor.channel = cursor.channel.next();
        if cursor.channel == ColorChannel::Green {
            cursor.led += 1;
            if cursor.led >= LEDS_PER_PANEL {
                cursor.led = 0;
                cursor.panel += 1;
                if cursor.panel >= PANELS {
                    cursor.panel = 0;
                    cursor.last_led_written = true;
                }
            }
        }

        HandshakeOutcome::Sent(byte)
    }
}
