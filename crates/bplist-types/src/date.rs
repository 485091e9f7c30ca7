// Plist dates are `f64` seconds relative to 2001-01-01T00:00:00Z (the
// Core Foundation absolute-time epoch), not the Unix epoch.

/// Seconds between 1970-01-01T00:00:00Z and 2001-01-01T00:00:00Z.
pub const APPLE_EPOCH_UNIX_OFFSET: f64 = 978_307_200.0;

/// Convert plist date seconds to Unix seconds.
pub fn to_unix_seconds(apple_seconds: f64) -> f64 {
  apple_seconds + APPLE_EPOCH_UNIX_OFFSET
}
