//! Vacancy oracle: does a candidate range overlap any live slot?

use mman_core::ByteRange;

use crate::table::SlotTable;

/// Whether no live slot in `table` shares a byte with `range`.
///
/// Checks every live slot; there is no auxiliary index. The answer depends
/// only on the table contents, so repeated queries are deterministic.
pub fn is_vacant(table: &SlotTable, range: ByteRange) -> bool {
    table
        .live()
        .all(|(_, slot)| !slot.range().intersects(&range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mman_core::{Handle, Slot, SlotIndex};
    use std::num::NonZeroUsize;

    fn table_with(slots: &[(usize, usize)]) -> SlotTable {
        let mut table = SlotTable::new(slots.len().max(1));
        for (i, &(offset, size)) in slots.iter().enumerate() {
            table.record(
                SlotIndex(i),
                Slot::new(
                    Handle::new(offset).unwrap(),
                    NonZeroUsize::new(size).unwrap(),
                ),
            );
        }
        table
    }

    #[test]
    fn empty_table_is_vacant_everywhere() {
        let table = SlotTable::new(4);
        assert!(is_vacant(&table, ByteRange::new(1, 15)));
    }

    #[test]
    fn touching_ranges_are_vacant() {
        // Live [5, 7]; query [1, 4] and [8, 10].
        let table = table_with(&[(5, 3)]);
        assert!(is_vacant(&table, ByteRange::from_closed(1, 4)));
        assert!(is_vacant(&table, ByteRange::from_closed(8, 10)));
    }

    #[test]
    fn any_shared_byte_is_occupied() {
        let table = table_with(&[(5, 3)]);
        assert!(!is_vacant(&table, ByteRange::from_closed(1, 5)));
        assert!(!is_vacant(&table, ByteRange::from_closed(7, 9)));
        assert!(!is_vacant(&table, ByteRange::from_closed(6, 6)));
        assert!(!is_vacant(&table, ByteRange::from_closed(1, 15)));
    }

    #[test]
    fn every_live_slot_is_consulted() {
        let table = table_with(&[(1, 2), (20, 2), (40, 2)]);
        assert!(!is_vacant(&table, ByteRange::new(41, 1)));
        assert!(is_vacant(&table, ByteRange::new(3, 17)));
    }
}
