//! Bounded byte inbox between the serial receive interrupt and the main loop.
//!
//! Built on `critical-section` and `heapless::Deque`, so it is safe to push
//! from an interrupt while the main loop drains it. Bytes arriving while the
//! inbox is full are dropped and counted, like a hardware overrun.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::ByteSource;

/// Error returned when trying to push into a full inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub u8);

/// Error returned when trying to pop from an empty inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

struct Inner<const SIZE: usize> {
    queue: Deque<u8, SIZE>,
    overruns: u32,
}

/// A bounded, interrupt-safe byte queue.
pub struct ByteChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Inner<SIZE>>>,
}

impl<const SIZE: usize> ByteChannel<SIZE> {
    /// Create a new empty inbox.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                queue: Deque::new(),
                overruns: 0,
            })),
        }
    }

    /// Get the handle given to the receive interrupt.
    pub const fn sender(&self) -> Sender<'_, SIZE> {
        Sender { channel: self }
    }

    /// Get the handle polled by the main loop.
    pub const fn receiver(&self) -> Receiver<'_, SIZE> {
        Receiver { channel: self }
    }

    /// Try to push a received byte.
    ///
    /// Returns `Err(TrySendError(byte))` and counts an overrun if the inbox
    /// is full.
    pub fn try_send(&self, byte: u8) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow(cs).borrow_mut();
            let result = inner.queue.push_back(byte).map_err(TrySendError);
            if result.is_err() {
                inner.overruns = inner.overruns.saturating_add(1);
            }
            result
        })
    }

    /// Try to pop the oldest byte.
    pub fn try_receive(&self) -> Result<u8, TryReceiveError> {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow(cs).borrow_mut();
            inner.queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of bytes waiting.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes dropped because the inbox was full.
    pub fn overruns(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().overruns)
    }
}

impl<const SIZE: usize> Default for ByteChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Push side of a [`ByteChannel`].
#[derive(Clone, Copy)]
pub struct Sender<'a, const SIZE: usize> {
    channel: &'a ByteChannel<SIZE>,
}

impl<const SIZE: usize> Sender<'_, SIZE> {
    pub fn try_send(&self, byte: u8) -> Result<(), TrySendError> {
        self.channel.try_send(byte)
    }
}

/// Pop side of a [`ByteChannel`].
#[derive(Clone, Copy)]
pub struct Receiver<'a, const SIZE: usize> {
    channel: &'a ByteChannel<SIZE>,
}

impl<const SIZE: usize> Receiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<u8, TryReceiveError> {
        self.channel.try_receive()
    }
}

impl<const SIZE: usize> ByteSource for Receiver<'_, SIZE> {
    fn read_byte(&mut self) -> Option<u8> {
        self.try_receive().ok()
    }
}
