//! Size limit constants for input validation

use std::time::Duration;

/// Maximum length for key set URLs (2048 characters)
pub(crate) const MAX_KEY_SET_URL_LENGTH: usize = 2048;

/// Maximum size for a key set response (512KB)
/// A realm rarely publishes more than a handful of keys, each well under 2KB
pub(crate) const MAX_KEY_SET_RESPONSE_SIZE: usize = 512 * 1024;

/// Width of a PEM body line in base64 characters (RFC 7468)
pub(crate) const PEM_LINE_WIDTH: usize = 64;

/// Longest cache time to live that is honored (100 years)
/// Longer values are clamped; the cache store panics above 1000 years
pub(crate) const MAX_CACHE_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
