//! Exit codes owned by the CLI itself.
//!
//! Status failures exit with `StatusError::exit_code()`:
//! 1 bad input, 4 purpose mismatch, 5 network, 6 encoded list, 130 cancelled.

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_IO_ERROR: i32 = 2; // Credential file unreadable or not JSON, bad arguments
