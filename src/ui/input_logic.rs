use super::Cursor;

/// Numeric value of a cursor; an empty cursor counts as -1.
fn position(cursor: Cursor) -> i16 {
    cursor.row().map_or(-1, i16::from)
}

/// Move selection cursor one item up, wrapping to the last item.
pub fn wrap_prev(cursor: Cursor, item_count: u8) -> Cursor {
    let n = i16::from(item_count.max(1));
    Cursor::at((position(cursor) + n - 1).rem_euclid(n) as u8)
}

/// Move selection cursor one item down, wrapping to the first item.
pub fn wrap_next(cursor: Cursor, item_count: u8) -> Cursor {
    let n = i16::from(item_count.max(1));
    Cursor::at((position(cursor) + 1).rem_euclid(n) as u8)
}
