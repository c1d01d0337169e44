//! Channel renumbering: turn a sparse set of CHIRP Locations into a
//! contiguous run of TK11 slots starting at 1.

use crate::model::InputChannelRecord;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Spans wider than this are almost certainly a typo in a Location cell.
pub const MAX_EXPECTED_SPAN: u128 = 10_000;

/// Records keyed by their original CHIRP Location.
#[derive(Debug, Default)]
pub struct LocationIndex {
    by_location: BTreeMap<i64, InputChannelRecord>,
    skipped: usize,
}

impl LocationIndex {
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = InputChannelRecord>,
    {
        let mut idx = LocationIndex::default();
        for rec in records {
            idx.insert(rec);
        }
        idx
    }

    /// Later records at the same Location replace earlier ones.
    pub fn insert(&mut self, rec: InputChannelRecord) {
        let raw = rec.location().unwrap_or("").trim();
        match raw.parse::<i64>() {
            Ok(loc) => {
                if self.by_location.insert(loc, rec).is_some() {
                    debug!("Location {} seen again; keeping the later row", loc);
                }
            }
            Err(_) => {
                warn!("Warning: Invalid Location value '{}' skipped.", raw);
                self.skipped += 1;
            }
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.by_location.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }

    /// `(min, max)` of the valid Locations, if any.
    pub fn span(&self) -> Option<(i64, i64)> {
        let min = *self.by_location.keys().next()?;
        let max = *self.by_location.keys().next_back()?;
        Some((min, max))
    }

    /// Number of slots the renumbered table will have.
    pub fn span_len(&self) -> u128 {
        match self.span() {
            Some((min, max)) => (i128::from(max) - i128::from(min) + 1) as u128,
            None => 0,
        }
    }

    /// Walk every Location from min to max, yielding the new 1-based slot
    /// number and the record stored there (if any).
    pub fn slots(&self) -> Slots<'_> {
        let (next, end) = match self.span() {
            Some((min, max)) => (min, Some(max)),
            None => (0, None),
        };
        Slots { idx: self, next, end, slot: 0 }
    }
}

pub struct Slots<'a> {
    idx: &'a LocationIndex,
    next: i64,
    end: Option<i64>,
    slot: usize,
}

impl<'a> Iterator for Slots<'a> {
    type Item = (usize, Option<&'a InputChannelRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.end?;
        if self.next > end {
            return None;
        }
        let loc = self.next;
        self.slot += 1;
        if loc == end {
            self.end = None;
        } else {
            self.next += 1;
        }
        Some((self.slot, self.idx.by_location.get(&loc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(loc: &str, name: &str) -> InputChannelRecord {
        InputChannelRecord::new().with("Location", loc).with("Name", name)
    }

    fn names(idx: &LocationIndex) -> Vec<(usize, Option<String>)> {
        idx.slots()
            .map(|(slot, rec)| (slot, rec.and_then(|r| r.get("Name")).map(String::from)))
            .collect()
    }

    #[test]
    fn gaps_become_empty_slots() {
        let idx = LocationIndex::build(vec![at("5", "five"), at("2", "two"), at("3", "three")]);
        assert_eq!(idx.span(), Some((2, 5)));
        assert_eq!(
            names(&idx),
            vec![
                (1, Some("two".into())),
                (2, Some("three".into())),
                (3, None),
                (4, Some("five".into())),
            ]
        );
    }

    #[test]
    fn duplicate_location_keeps_last() {
        let idx = LocationIndex::build(vec![at("1", "first"), at(" 1 ", "second")]);
        assert_eq!(names(&idx), vec![(1, Some("second".into()))]);
    }

    #[test]
    fn invalid_locations_are_skipped() {
        let idx = LocationIndex::build(vec![
            at("x", "bad"),
            at("", "blank"),
            InputChannelRecord::new().with("Name", "no column"),
            at("4", "ok"),
        ]);
        assert_eq!(idx.skipped(), 3);
        assert_eq!(idx.len(), 1);
        assert_eq!(names(&idx), vec![(1, Some("ok".into()))]);
    }

    #[test]
    fn no_valid_locations_yields_nothing() {
        let idx = LocationIndex::build(vec![at("nope", "bad")]);
        assert!(idx.is_empty());
        assert_eq!(idx.span(), None);
        assert_eq!(idx.slots().count(), 0);
    }

    #[test]
    fn negative_and_zero_locations_are_valid() {
        let idx = LocationIndex::build(vec![at("-1", "a"), at("1", "c")]);
        assert_eq!(idx.slots().count(), 3);
    }

    #[test]
    fn span_len_covers_extreme_locations() {
        let idx = LocationIndex::build(vec![at("3", "a"), at("7", "b")]);
        assert_eq!(idx.span_len(), 5);
        assert_eq!(LocationIndex::default().span_len(), 0);

        let wide = LocationIndex::build(vec![at("0", "a"), at(&i64::MAX.to_string(), "b")]);
        assert_eq!(wide.span_len(), i64::MAX as u128 + 1);
        assert!(wide.span_len() > MAX_EXPECTED_SPAN);

        let full = LocationIndex::build(vec![
            at(&i64::MIN.to_string(), "a"),
            at(&i64::MAX.to_string(), "b"),
        ]);
        assert_eq!(full.span_len(), u64::MAX as u128 + 1);
    }

    #[test]
    fn span_ending_at_i64_max_terminates() {
        let idx = LocationIndex::build(vec![at(&i64::MAX.to_string(), "edge")]);
        assert_eq!(idx.slots().count(), 1);
    }
}
