use crate::color::{Rgbw, rgbw};

/// Interpolate one channel between two endpoints
///
/// Returns `start + index * (end - start) / divisor`, evaluated in floating
/// point and truncated toward zero. A zero divisor yields `start`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn lerp_channel(start: u8, end: u8, index: usize, divisor: usize) -> u8 {
    if divisor == 0 {
        return start;
    }

    let step = (f32::from(end) - f32::from(start)) / divisor as f32;
    let value = libm::truncf(f32::from(start) + index as f32 * step);

    value.clamp(0.0, 255.0) as u8
}

/// Fill `leds` with a linear two-color ramp
///
/// Entry `i` is `start + i * (end - start) / divisor` on every channel, so a
/// divisor equal to `leds.len() - 1` lands exactly on `end` for the last
/// entry (up to one unit of truncation), while a divisor equal to
/// `leds.len()` stops one step short of it.
pub fn fill_linear(leds: &mut [Rgbw], start: Rgbw, end: Rgbw, divisor: usize) {
    for (i, led) in leds.iter_mut().enumerate() {
        *led = rgbw(
            lerp_channel(start.r, end.r, i, divisor),
            lerp_channel(start.g, end.g, i, divisor),
            lerp_channel(start.b, end.b, i, divisor),
            lerp_channel(start.a.0, end.a.0, i, divisor),
        );
    }
}
