//! Resource identifiers.

use uuid::Uuid;

/// Parse a client-supplied identifier.
///
/// Returns `None` for anything the store could never hold, so callers can
/// treat malformed ids exactly like ids with no record behind them.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
