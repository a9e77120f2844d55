//! Exit codes for atlasctl.
//!
//! A degraded or fallback answer is still a successful invocation; only
//! unrecoverable startup failures exit non-zero.

/// Exit code for success, including degraded/fallback answers.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general startup errors (unreadable config, bad flags).
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the backend requires credentials and none are configured.
pub const EXIT_MISSING_CREDENTIALS: i32 = 78;
