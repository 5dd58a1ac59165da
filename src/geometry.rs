//! Compile-time panel geometry.

use crate::color::TRANSMIT_ORDER;
use crate::command::EFFECT_COLOR_BASE;

/// Panels attached in the reference installation
pub const DEFAULT_PANELS: usize = 5;

/// LEDs inside one panel
pub const DEFAULT_LEDS_PER_PANEL: usize = 15;

/// Entries in the animation buffer
pub const DEFAULT_BUFFER_LEN: usize = 100;

/// Geometry of the attached panel chain
///
/// Carries no data; it groups the derived sizes and the checks that every
/// stateful type runs on its const parameters.
pub struct Geometry<const PANELS: usize, const LEDS_PER_PANEL: usize, const BUFFER_LEN: usize>;

impl<const PANELS: usize, const LEDS_PER_PANEL: usize, const BUFFER_LEN: usize>
    Geometry<PANELS, LEDS_PER_PANEL, BUFFER_LEN>
{
    /// Evaluating this constant rejects invalid geometry at compile time
    pub const CHECK: () = {
        assert!(PANELS >= 1, "at least one panel is required");
        assert!(
            PANELS <= EFFECT_COLOR_BASE as usize,
            "panel addresses would overlap the effect color range"
        );
        assert!(LEDS_PER_PANEL >= 1, "a panel needs at least one LED");
        assert!(
            BUFFER_LEN >= PANELS,
            "animation buffer must hold at least one entry per panel"
        );
    };

    /// Largest animation offset that keeps the panel window inside the buffer
    pub const MAX_OFFSET: usize = BUFFER_LEN - PANELS;

    /// Channel bytes emitted during one sweep
    pub const BYTES_PER_SWEEP: usize = PANELS * LEDS_PER_PANEL * TRANSMIT_ORDER.len();

    /// Events consumed by one sweep, including the kickoff and the terminator
    pub const EVENTS_PER_SWEEP: usize = Self::BYTES_PER_SWEEP + 1;
}
