#![no_std]

/// Diagnostic output, compiled out unless `esp32-log` is enabled
///
/// A macro instead of a feature-gated `use esp_println::println` so call
/// sites need no `cfg` of their own.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
    };
}

pub mod channel;
pub mod clock;
pub mod color;
pub mod command;
pub mod controller;
pub mod engine;
pub mod geometry;
pub mod mode;
pub mod receiver;
pub mod shared;
pub mod store;
pub mod transmitter;

pub use channel::ByteChannel;
pub use clock::{AnimationOffset, TickOutcome, TickScheduler};
pub use color::{ColorChannel, Rgbw, rgbw};
pub use command::{Command, EffectColorSlot};
pub use controller::{
    Controller, ControllerConfig, PRESET_EFFECT_COLORS, PRESET_PANEL_COLOR, PollOutcome,
};
pub use engine::ColorEngine;
pub use geometry::{DEFAULT_BUFFER_LEN, DEFAULT_LEDS_PER_PANEL, DEFAULT_PANELS, Geometry};
pub use mode::DisplayMode;
pub use receiver::{CommandReceiver, ReceiverState};
pub use shared::{ClockContext, HandshakeContext, MainContext, SharedState};
pub use store::{Changes, ColorStore};
pub use transmitter::{DataLines, HandshakeOutcome, SweepError, TransmitCursor, Transmitter};

pub use embassy_time::{Duration, Instant};

/// Parallel interface of the LED booster
///
/// Implement this trait on top of the GPIO ports wired to the booster. The
/// booster turns every strobed byte into the serial LED protocol on its own
/// and reports completion through the handshake line.
pub trait BoosterPort {
    /// Drive the data lines with the next byte
    fn write_lines(&mut self, lines: DataLines);

    /// Pulse the send line for one cycle
    fn strobe(&mut self);
}

/// Source of control stream bytes, polled by the main loop
pub trait ByteSource {
    /// Take the next received byte, if any
    fn read_byte(&mut self) -> Option<u8>;
}

impl<const N: usize> ByteSource for heapless::Deque<u8, N> {
    fn read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}
