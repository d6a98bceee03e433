//! How long the rover takes to drive its route on screen.
//!
//! This is only a hint for the browser's animation; nothing in the crate
//! ever waits for it.

/// Pixels per second covered at speed 1.
pub const PIXELS_PER_SPEED_STEP: f64 = 40.0;
/// Upper bound on any animation, in seconds.
pub const MAX_DURATION: f64 = 120.0;
/// Speed 0 plays a slow fixed-length animation instead of freezing.
pub const FROZEN_DURATION: f64 = 4.0;

pub fn duration(travel: f64, speed: u8) -> f64 {
    if speed == 0 {
        return FROZEN_DURATION;
    }
    let pixels_per_second = PIXELS_PER_SPEED_STEP * f64::from(speed);
    (travel.max(0.0) / pixels_per_second).min(MAX_DURATION)
}

/// The `dur` attribute value, e.g. `3.75s`.
pub fn duration_attr(travel: f64, speed: u8) -> String {
    format!("{:.2}s", duration(travel, speed))
}
