//! Byte-at-a-time decoder for the control stream.
//!
//! Each state carries exactly the fields received so far, so a channel value
//! can never be read before it arrived. Any byte with the high bit set
//! restarts addressing, whatever the current state.

use crate::ByteSource;
use crate::command::{ADDRESS_FLAG, Command, MSB_BYTE_RESERVED, PAYLOAD_MASK, decode_color};

/// Decoder progress through one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReceiverState {
    /// Waiting for an address byte
    #[default]
    Idle,
    AddressReceived {
        address: u8,
    },
    RedReceived {
        address: u8,
        red: u8,
    },
    GreenReceived {
        address: u8,
        red: u8,
        green: u8,
    },
    BlueReceived {
        address: u8,
        red: u8,
        green: u8,
        blue: u8,
    },
    /// All channels received, waiting for the MSB byte
    WhiteReceived {
        address: u8,
        red: u8,
        green: u8,
        blue: u8,
        white: u8,
    },
}

/// Finite state machine decoding frames into [`Command`]s
///
/// `PANELS` bounds the panel address range used for routing.
#[derive(Debug, Clone, Default)]
pub struct CommandReceiver<const PANELS: usize> {
    state: ReceiverState,
}

impl<const PANELS: usize> CommandReceiver<PANELS> {
    pub const fn new() -> Self {
        Self {
            state: ReceiverState::Idle,
        }
    }

    pub const fn state(&self) -> ReceiverState {
        self.state
    }

    /// Drop any partially received frame
    pub fn reset(&mut self) {
        self.state = ReceiverState::Idle;
    }

    /// Read at most one byte from `source` and feed it to the decoder
    ///
    /// Does nothing if no byte is pending.
    pub fn poll<S: ByteSource>(&mut self, source: &mut S) -> Option<Command> {
        let byte = source.read_byte()?;
        self.feed(byte)
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns the routed command once a complete, well-formed frame for a
    /// known address has been received.
    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        if byte & ADDRESS_FLAG != 0 {
            self.state = ReceiverState::AddressReceived {
                address: byte & PAYLOAD_MASK,
            };
            return None;
        }

        let (next, command) = match self.state {
            // Stray payload byte, keep waiting for an address
            ReceiverState::Idle => (ReceiverState::Idle, None),
            ReceiverState::AddressReceived { address } => (
                ReceiverState::RedReceived { address, red: byte },
                None,
            ),
            ReceiverState::RedReceived { address, red } => (
                ReceiverState::GreenReceived {
                    address,
                    red,
                    green: byte,
                },
                None,
            ),
            ReceiverState::GreenReceived {
                address,
                red,
                green,
            } => (
                ReceiverState::BlueReceived {
                    address,
                    red,
                    green,
                    blue: byte,
                },
                None,
            ),
            ReceiverState::BlueReceived {
                address,
                red,
                green,
                blue,
            } => (
                ReceiverState::WhiteReceived {
                    address,
                    red,
                    green,
                    blue,
                    white: byte,
                },
                None,
            ),
            ReceiverState::WhiteReceived {
                address,
                red,
                green,
                blue,
                white,
            } => (ReceiverState::Idle, Self::finish(address, red, green, blue, white, byte)),
        };

        self.state = next;
        command
    }

    fn finish(address: u8, red: u8, green: u8, blue: u8, white: u8, msb: u8) -> Option<Command> {
        if msb & MSB_BYTE_RESERVED != 0 {
            trace!("malformed msb byte {:#04x} for address {}", msb, address);
            return None;
        }

        let color = decode_color(red, green, blue, white, msb);
        let command = Command::route(address, color, PANELS);
        if command.is_none() {
            trace!("dropped frame for unknown address {}", address);
        }
        command
    }
}
