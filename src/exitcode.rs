//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Data format error (bad tax id, duplicate, empty name)
pub const DATAERR: i32 = 65;

/// Cannot open input (client not found)
pub const NOINPUT: i32 = 66;

/// Input/output error (console or storage)
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
