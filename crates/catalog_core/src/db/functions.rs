//! Application-defined SQL functions.
//!
//! # Invariants
//! - `fold(text)` lowercases with full Unicode rules, unlike SQLite's
//!   ASCII-only `lower()` and `NOCASE`. `NULL` stays `NULL`.
//! - Registration is idempotent; re-registering replaces the function.

use super::DbResult;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Registers every catalog SQL function on `conn`.
pub fn register_functions(conn: &Connection) -> DbResult<()> {
    conn.create_scalar_function(
        "fold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}
