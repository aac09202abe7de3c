// Name-auction consensus core: name-state machine, block assembler and
// authoritative resolver for a naming blockchain.
// Written in 2026 by
//     Name Chain Developers
//
// To the extent possible under law, the author(s) have dedicated all copyright
// and related and neighboring rights to this software to the public domain
// worldwide. This software is distributed without any warranty.
//
// You should have received a copy of the MIT License along with this software.
// If not, see <https://opensource.org/licenses/MIT>.

//! The interactive rescan driver (spec.md §5 "Cancellation", §9 "Interactive
//! rescan"): a long-running block walk that yields one item at a time and
//! accepts a per-iteration control signal before continuing.
//!
//! Modeled as explicit `(index, filter)` state plus a step function rather
//! than a generator, per spec.md §9's "implementable as explicit state ...
//! or as a generator in languages with one" -- Rust has no stable
//! generators, so this crate takes the explicit-state form.

use crate::Height;

/// The reply a caller gives after inspecting one yielded [`ScanItem`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ScanControl {
    /// Advance to the next item.
    Next,
    /// Re-yield the same item (e.g. after a transient read failure).
    Repeat,
    /// Re-yield the same item, replacing the scan's active filter.
    RepeatSet(Vec<Vec<u8>>),
    /// Re-yield the same item, appending to the scan's active filter.
    RepeatAdd(Vec<Vec<u8>>),
    /// Abort the scan. The chain lock the caller holds is released by the
    /// caller on receiving [`RescanError::Aborted`]; the driver itself does
    /// not hold any lock.
    Abort,
}

/// One item a rescan walk yields: the height being scanned and its opaque
/// entry payload (a serialized block header or name-tree leaf, depending on
/// what the storage backend is rescanning), plus the transactions of
/// interest the backend selected against the scan's filter.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScanItem {
    /// Height of the scanned entry.
    pub height: Height,
    /// Opaque entry payload (e.g. a serialized header).
    pub entry: Vec<u8>,
    /// Transactions of interest found at this height.
    pub txs: Vec<Vec<u8>>,
}

/// Raised when a caller replies [`ScanControl::Abort`] mid-scan.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum RescanError {
    /// scan aborted at height {0}
    Aborted(Height),
}

/// Drives one interactive rescan over a fixed sequence of [`ScanItem`]s.
pub struct Rescanner {
    items: Vec<ScanItem>,
    pos: usize,
    filter: Vec<Vec<u8>>,
}

impl Rescanner {
    /// Start a scan over `items` with an initially empty filter.
    pub fn new(items: Vec<ScanItem>) -> Self { Rescanner { items, pos: 0, filter: Vec::new() } }

    /// The filter currently in effect, mutated only by `REPEAT_SET`/`REPEAT_ADD`.
    pub fn filter(&self) -> &[Vec<u8>] { &self.filter }

    /// Yield the first item, if any, without requiring a prior reply.
    pub fn start(&self) -> Option<ScanItem> { self.items.get(self.pos).cloned() }

    /// Apply `reply` to the item last yielded and return the next one to
    /// hand the caller, or `Ok(None)` once the scan is exhausted.
    pub fn step(&mut self, reply: ScanControl) -> Result<Option<ScanItem>, RescanError> {
        match reply {
            ScanControl::Next => self.pos += 1,
            ScanControl::Repeat => {}
            ScanControl::RepeatSet(filter) => self.filter = filter,
            ScanControl::RepeatAdd(mut filter) => self.filter.append(&mut filter),
            ScanControl::Abort => {
                let height = self.items.get(self.pos).map(|i| i.height).unwrap_or(0);
                return Err(RescanError::Aborted(height));
            }
        }
        Ok(self.items.get(self.pos).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ScanItem> {
        (0..3)
            .map(|h| ScanItem { height: h, entry: vec![h as u8], txs: vec![] })
            .collect()
    }

    #[test]
    fn next_advances_through_every_item() {
        let mut scan = Rescanner::new(items());
        assert_eq!(scan.start().unwrap().height, 0);
        assert_eq!(scan.step(ScanControl::Next).unwrap().unwrap().height, 1);
        assert_eq!(scan.step(ScanControl::Next).unwrap().unwrap().height, 2);
        assert_eq!(scan.step(ScanControl::Next).unwrap(), None);
    }

    #[test]
    fn repeat_re_yields_the_same_item() {
        let mut scan = Rescanner::new(items());
        scan.step(ScanControl::Next).unwrap();
        let again = scan.step(ScanControl::Repeat).unwrap().unwrap();
        assert_eq!(again.height, 1);
    }

    #[test]
    fn repeat_set_replaces_the_filter_and_re_yields() {
        let mut scan = Rescanner::new(items());
        let item = scan.step(ScanControl::RepeatSet(vec![vec![1, 2, 3]])).unwrap().unwrap();
        assert_eq!(item.height, 0);
        assert_eq!(scan.filter(), &[vec![1u8, 2, 3]]);
    }

    #[test]
    fn repeat_add_appends_to_the_filter() {
        let mut scan = Rescanner::new(items());
        scan.step(ScanControl::RepeatSet(vec![vec![1]])).unwrap();
        scan.step(ScanControl::RepeatAdd(vec![vec![2]])).unwrap();
        assert_eq!(scan.filter(), &[vec![1u8], vec![2u8]]);
    }

    #[test]
    fn abort_surfaces_the_height_it_stopped_at() {
        let mut scan = Rescanner::new(items());
        scan.step(ScanControl::Next).unwrap();
        let err = scan.step(ScanControl::Abort).unwrap_err();
        assert_eq!(err, RescanError::Aborted(1));
    }
}
