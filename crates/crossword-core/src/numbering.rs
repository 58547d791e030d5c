use crate::types::{PlacedWord, Position};
use std::collections::BTreeMap;

/// Assign clue numbers to placed words.
///
/// Words are sorted by start cell in reading order (row, then column). Each
/// distinct start cell gets the next number starting at 1; an across and a
/// down word sharing a start cell share the number.
pub fn number_clues(placed: &mut [PlacedWord]) {
    placed.sort_by_key(|w| (w.row, w.col));

    let mut next = 1;
    let mut last_start: Option<Position> = None;
    for word in placed.iter_mut() {
        let start = word.start();
        if last_start != Some(start) {
            word.number = next;
            next += 1;
            last_start = Some(start);
        } else {
            word.number = next - 1;
        }
    }
}

/// Display number for every start cell: the smallest clue number starting there
pub fn start_cell_numbers(placed: &[PlacedWord]) -> BTreeMap<Position, u32> {
    let mut numbers: BTreeMap<Position, u32> = BTreeMap::new();
    for word in placed {
        numbers
            .entry(word.start())
            .and_modify(|n| *n = (*n).min(word.number))
            .or_insert(word.number);
    }
    numbers
}
