//! Target colors and display mode as last commanded.

use crate::color::Rgbw;
use crate::command::{Command, EFFECT_COLORS, EffectColorSlot};
use crate::mode::DisplayMode;

/// Change notifications raised since the last [`ColorStore::take_changes`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    /// A panel or effect color was written
    pub color: bool,
    /// The display mode was written
    pub mode: bool,
}

impl Changes {
    pub const fn any(self) -> bool {
        self.color || self.mode
    }
}

/// Colors and mode owned by the main loop
///
/// Written only through [`ColorStore::apply`]; every write raises the
/// matching change flag, even if the value did not actually differ.
#[derive(Debug, Clone)]
pub struct ColorStore<const PANELS: usize> {
    panels: [Rgbw; PANELS],
    effects: [Rgbw; EFFECT_COLORS],
    mode: DisplayMode,
    changes: Changes,
}

impl<const PANELS: usize> ColorStore<PANELS> {
    /// Create a store showing `mode` with the given startup colors
    ///
    /// The color flag starts raised so the first pass renders the initial
    /// state.
    pub const fn new(
        mode: DisplayMode,
        panels: [Rgbw; PANELS],
        effects: [Rgbw; EFFECT_COLORS],
    ) -> Self {
        Self {
            panels,
            effects,
            mode,
            changes: Changes {
                color: true,
                mode: false,
            },
        }
    }

    /// Apply a decoded command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::SetPanelColor { panel, color } => {
                // Routing never yields an out-of-range panel; drop it if it does.
                let Some(slot) = self.panels.get_mut(usize::from(panel)) else {
                    return;
                };
                *slot = color;
                self.changes.color = true;
            }
            Command::SetEffectColor { slot, color } => {
                self.effects[slot.index()] = color;
                self.changes.color = true;
            }
            Command::SelectMode(mode) => {
                trace!("mode -> {}", mode.as_str());
                self.mode = mode;
                self.changes.mode = true;
            }
        }
    }

    /// Return pending change flags and clear them
    pub fn take_changes(&mut self) -> Changes {
        core::mem::take(&mut self.changes)
    }

    pub const fn changes(&self) -> Changes {
        self.changes
    }

    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub const fn panels(&self) -> &[Rgbw; PANELS] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<Rgbw> {
        self.panels.get(index).copied()
    }

    pub const fn effect(&self, slot: EffectColorSlot) -> Rgbw {
        self.effects[slot.index()]
    }
}
