//! Commands carried by the serial control stream and their wire framing.
//!
//! Frame format (one byte per line):
//! - `1AAAAAAA`: target address, 0-127
//! - `0RRRRRRR`: red, low 7 bits
//! - `0GGGGGGG`: green, low 7 bits
//! - `0BBBBBBB`: blue, low 7 bits
//! - `0WWWWWWW`: white, low 7 bits
//! - `0000ZYXW`: channel MSBs (bit 0 red, bit 1 green, bit 2 blue, bit 3 white)
//!
//! Only the address byte has its high bit set, which lets a receiver
//! resynchronize on any address byte.

use crate::color::{Rgbw, rgbw};
use crate::mode::{DisplayMode, MODE_COUNT};

/// Length of one encoded command
pub const FRAME_LEN: usize = 6;

/// Marks an address byte
pub const ADDRESS_FLAG: u8 = 0x80;

/// Bits of a channel byte that carry data
pub const PAYLOAD_MASK: u8 = 0x7F;

/// Bits of the final byte that must be clear
pub const MSB_BYTE_RESERVED: u8 = 0xF0;

/// First address of the effect color slots
pub const EFFECT_COLOR_BASE: u8 = 100;

/// Number of effect color slots
pub const EFFECT_COLORS: usize = 3;

/// First address of the mode select range
pub const MODE_SELECT_BASE: u8 = 120;

/// Reference color used by the single color, fade and gradient modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectColorSlot {
    /// Color of [`DisplayMode::SingleColor`]
    Single = 0,
    /// Start of the fade and gradient ramps
    RampStart = 1,
    /// End of the fade and gradient ramps
    RampEnd = 2,
}

impl EffectColorSlot {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Single,
            1 => Self::RampStart,
            2 => Self::RampEnd,
            _ => return None,
        })
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A fully decoded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set the color of one panel
    SetPanelColor { panel: u8, color: Rgbw },
    /// Set one of the effect reference colors
    SetEffectColor { slot: EffectColorSlot, color: Rgbw },
    /// Switch display mode. The color payload of the frame is ignored.
    SelectMode(DisplayMode),
}

impl Command {
    /// Route a received frame by its address
    ///
    /// Returns `None` for addresses outside every range, in which case the
    /// frame is dropped.
    pub fn route(address: u8, color: Rgbw, panels: usize) -> Option<Self> {
        if usize::from(address) < panels {
            return Some(Self::SetPanelColor {
                panel: address,
                color,
            });
        }
        if let Some(slot) = address
            .checked_sub(EFFECT_COLOR_BASE)
            .and_then(EffectColorSlot::from_raw)
        {
            return Some(Self::SetEffectColor { slot, color });
        }
        address
            .checked_sub(MODE_SELECT_BASE)
            .filter(|raw| *raw < MODE_COUNT)
            .map(|raw| Self::SelectMode(DisplayMode::from_raw_or_off(raw)))
    }

    /// Address this command is sent to
    #[allow(clippy::cast_possible_truncation)]
    pub const fn address(self) -> u8 {
        match self {
            Self::SetPanelColor { panel, .. } => panel,
            Self::SetEffectColor { slot, .. } => EFFECT_COLOR_BASE + slot as u8,
            Self::SelectMode(mode) => MODE_SELECT_BASE + mode.as_raw(),
        }
    }

    /// Encode the command into its wire frame
    pub const fn encode(self) -> [u8; FRAME_LEN] {
        let color = match self {
            Self::SetPanelColor { color, .. } | Self::SetEffectColor { color, .. } => color,
            Self::SelectMode(_) => crate::color::BLACK,
        };
        let msb = (color.r >> 7)
            | ((color.g >> 7) << 1)
            | ((color.b >> 7) << 2)
            | ((color.a.0 >> 7) << 3);

        [
            ADDRESS_FLAG | (self.address() & PAYLOAD_MASK),
            color.r & PAYLOAD_MASK,
            color.g & PAYLOAD_MASK,
            color.b & PAYLOAD_MASK,
            color.a.0 & PAYLOAD_MASK,
            msb,
        ]
    }
}

/// Rebuild full 8-bit channels from their low 7 bits and the MSB nibble
pub const fn decode_color(red: u8, green: u8, blue: u8, white: u8, msb: u8) -> Rgbw {
    rgbw(
        (red & PAYLOAD_MASK) | ((msb & 0x01) << 7),
        (green & PAYLOAD_MASK) | ((msb & 0x02) << 6),
        (blue & PAYLOAD_MASK) | ((msb & 0x04) << 5),
        (white & PAYLOAD_MASK) | ((msb & 0x08) << 4),
    )
}
