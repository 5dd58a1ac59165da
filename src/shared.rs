//! State shared between the main loop and the two interrupt handlers.
//!
//! Three contexts touch this state: the main loop (publishes frames, gates
//! the clock, starts static sweeps), the booster handshake interrupt
//! (advances the transmit cursor) and the animation clock interrupt (advances
//! the offset and starts fade sweeps). Each gets its own handle exposing only
//! the operations that context performs. All accesses run inside a
//! critical section.

use core::cell::{Cell, RefCell};

use critical_section::{CriticalSection, Mutex};

use crate::BoosterPort;
use crate::clock::{AnimationOffset, TickOutcome};
use crate::color::{BLACK, Rgbw};
use crate::geometry::Geometry;
use crate::transmitter::{HandshakeOutcome, SweepError, TransmitCursor, Transmitter};

/// Cross-context controller state
///
/// Meant to live in a `static`; see [`SharedState::new`].
pub struct SharedState<
    P: BoosterPort,
    const PANELS: usize,
    const LEDS_PER_PANEL: usize,
    const BUFFER_LEN: usize,
> {
    frame: Mutex<RefCell<[Rgbw; BUFFER_LEN]>>,
    offset: Mutex<Cell<AnimationOffset>>,
    clock_enabled: Mutex<Cell<bool>>,
    offset_reset_pending: Mutex<Cell<bool>>,
    transmitter: Mutex<RefCell<Transmitter<P, PANELS, LEDS_PER_PANEL>>>,
}

impl<P: BoosterPort, const PANELS: usize, const LEDS_PER_PANEL: usize, const BUFFER_LEN: usize>
    SharedState<P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>
{
    /// Create the shared state around the booster port
    ///
    /// Starts with a dark frame, the clock disabled and no sweep running.
    pub const fn new(port: P) -> Self {
        let () = Geometry::<PANELS, LEDS_PER_PANEL, BUFFER_LEN>::CHECK;
        Self {
            frame: Mutex::new(RefCell::new([BLACK; BUFFER_LEN])),
            offset: Mutex::new(Cell::new(AnimationOffset::new())),
            clock_enabled: Mutex::new(Cell::new(false)),
            offset_reset_pending: Mutex::new(Cell::new(false)),
            transmitter: Mutex::new(RefCell::new(Transmitter::new(port))),
        }
    }

    /// Handle for the main loop
    pub const fn main(&self) -> MainContext<'_, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN> {
        MainContext { shared: self }
    }

    /// Handle for the booster handshake interrupt
    pub const fn handshake(&self) -> HandshakeContext<'_, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN> {
        HandshakeContext { shared: self }
    }

    /// Handle for the animation clock interrupt
    pub const fn clock(&self) -> ClockContext<'_, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN> {
        ClockContext { shared: self }
    }

    /// Snapshot of the transmit cursor
    pub fn cursor(&self) -> TransmitCursor {
        critical_section::with(|cs| self.transmitter.borrow(cs).borrow().cursor())
    }

    pub fn offset(&self) -> AnimationOffset {
        critical_section::with(|cs| self.offset.borrow(cs).get())
    }

    /// Returns if an offset reset waits for the running sweep to finish
    pub fn is_offset_reset_pending(&self) -> bool {
        critical_section::with(|cs| self.offset_reset_pending.borrow(cs).get())
    }

    pub fn is_clock_enabled(&self) -> bool {
        critical_section::with(|cs| self.clock_enabled.borrow(cs).get())
    }

    /// Published buffer entry, if `index` is in range
    pub fn frame_entry(&self, index: usize) -> Option<Rgbw> {
        critical_section::with(|cs| self.frame.borrow(cs).borrow().get(index).copied())
    }

    /// Run `f` with exclusive access to the booster port
    pub fn with_port<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        critical_section::with(|cs| f(self.transmitter.borrow(cs).borrow_mut().port_mut()))
    }

    fn start_sweep(&self, cs: CriticalSection<'_>) -> Result<(), SweepError> {
        let frame = self.frame.borrow(cs).borrow();
        let offset = self.offset.borrow(cs).get().value();
        self.transmitter
            .borrow(cs)
            .borrow_mut()
            .on_kickoff(&frame[..], offset)
    }

    fn is_sweeping(&self, cs: CriticalSection<'_>) -> bool {
        self.transmitter.borrow(cs).borrow().is_sweeping()
    }
}

/// Main loop access: frame publication, clock gating, static sweeps
pub struct MainContext<
    'a,
    P: BoosterPort,
    const PANELS: usize,
    const LEDS_PER_PANEL: usize,
    const BUFFER_LEN: usize,
> {
    shared: &'a SharedState<P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>,
}

impl<P: BoosterPort, const PANELS: usize, const LEDS_PER_PANEL: usize, const BUFFER_LEN: usize>
    MainContext<'_, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>
{
    /// Replace the buffer seen by the interrupt handlers
    ///
    /// The copy happens in one critical section, so handlers observe either
    /// the previous or the new buffer, never a mix.
    pub fn publish(&self, frame: &[Rgbw; BUFFER_LEN]) {
        critical_section::with(|cs| {
            *self.shared.frame.borrow(cs).borrow_mut() = *frame;
        });
    }

    pub fn set_clock_enabled(&self, enabled: bool) {
        critical_section::with(|cs| self.shared.clock_enabled.borrow(cs).set(enabled));
    }

    pub fn is_sweeping(&self) -> bool {
        critical_section::with(|cs| self.shared.is_sweeping(cs))
    }

    /// Move the fade window back to the buffer start
    ///
    /// Applied at once when no sweep is running. Otherwise it is deferred to
    /// the handshake that terminates the running sweep, so that sweep keeps
    /// its window while the reset still happens before any later sweep.
    pub fn reset_offset(&self) {
        critical_section::with(|cs| {
            if self.shared.is_sweeping(cs) {
                self.shared.offset_reset_pending.borrow(cs).set(true);
            } else {
                self.shared.offset.borrow(cs).set(AnimationOffset::new());
            }
        });
    }

    /// Start a sweep at the current offset
    pub fn kickoff(&self) -> Result<(), SweepError> {
        critical_section::with(|cs| self.shared.start_sweep(cs))
    }

    /// Reset the offset to the buffer start and start a sweep
    ///
    /// Used by static modes. Nothing changes if a sweep is running, so the
    /// window of the running sweep never moves.
    pub fn kickoff_at_origin(&self) -> Result<(), SweepError> {
        critical_section::with(|cs| {
            if self.shared.is_sweeping(cs) {
                return Err(SweepError::Busy);
            }
            self.shared.offset.borrow(cs).set(AnimationOffset::new());
            self.shared.start_sweep(cs)
        })
    }
}

/// Booster handshake interrupt access
pub struct HandshakeContext<
    'a,
    P: BoosterPort,
    const PANELS: usize,
    const LEDS_PER_PANEL: usize,
    const BUFFER_LEN: usize,
> {
    shared: &'a SharedState<P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>,
}

impl<P: BoosterPort, const PANELS: usize, const LEDS_PER_PANEL: usize, const BUFFER_LEN: usize>
    HandshakeContext<'_, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>
{
    /// The booster latched the previous byte and is ready for the next one
    pub fn on_handshake(&self) -> HandshakeOutcome {
        critical_section::with(|cs| {
            let frame = self.shared.frame.borrow(cs).borrow();
            let offset = self.shared.offset.borrow(cs).get().value();
            let outcome = self
                .shared
                .transmitter
                .borrow(cs)
                .borrow_mut()
                .on_handshake(&frame[..], offset);

            if outcome == HandshakeOutcome::Finished
                && self.shared.offset_reset_pending.borrow(cs).replace(false)
            {
                self.shared.offset.borrow(cs).set(AnimationOffset::new());
            }
            outcome
        })
    }
}

/// Animation clock interrupt access
pub struct ClockContext<
    'a,
    P: BoosterPort,
    const PANELS: usize,
    const LEDS_PER_PANEL: usize,
    const BUFFER_LEN: usize,
> {
    shared: &'a SharedState<P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>,
}

impl<P: BoosterPort, const PANELS: usize, const LEDS_PER_PANEL: usize, const BUFFER_LEN: usize>
    ClockContext<'_, P, PANELS, LEDS_PER_PANEL, BUFFER_LEN>
{
    /// Periodic tick: slide the fade window one step and start a sweep
    pub fn on_tick(&self) -> TickOutcome {
        critical_section::with(|cs| {
            if !self.shared.clock_enabled.borrow(cs).get() {
                return TickOutcome::Disabled;
            }
            if self.shared.is_sweeping(cs) {
                return TickOutcome::Busy;
            }

            let cell = self.shared.offset.borrow(cs);
            let mut offset = cell.get();
            offset.advance(Geometry::<PANELS, LEDS_PER_PANEL, BUFFER_LEN>::MAX_OFFSET);
            cell.set(offset);

            match self.shared.start_sweep(cs) {
                Ok(()) => TickOutcome::Advanced(offset.value()),
                Err(SweepError::Busy) => TickOutcome::Busy,
            }
        })
    }
}
