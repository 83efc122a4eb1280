use crate::submission::SubmissionRecord;
use crate::time::{Cell, RangeError, TimeRange};
use log::{debug, warn};
use std::collections::btree_map::Iter;
use std::collections::BTreeMap;

/// Aggregate for one 30-minute sub-slot: how many submissions cover it and
/// who they came from. Names repeat only if a submitter double-submits the
/// same slot within one record.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SlotTally {
    pub count: u32,
    pub submitters: Vec<String>,
}

/// A range label that was excluded from aggregation, kept for inspection.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RejectedRange {
    pub submitter_name: String,
    pub range: String,
    pub reason: RangeError,
}

/// Per-slot density map for one week of submissions. Derived data: rebuilt
/// wholesale from the fetched records on every refresh, never patched
/// incrementally.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HeatMap {
    slots: BTreeMap<Cell, SlotTally>,
    rejected: Vec<RejectedRange>,
}

impl HeatMap {
    /// Aggregates a week's records: every declared range is parsed,
    /// segmented into sub-slots, and tallied per sub-slot. A malformed
    /// range is rejected whole rather than partially aggregated; the rest
    /// of the record still counts.
    pub fn from_submissions(records: &[SubmissionRecord]) -> HeatMap {
        let mut map = HeatMap::default();
        for record in records {
            map.absorb(record);
        }
        debug!(
            "aggregated {} records into {} populated slots ({} ranges rejected)",
            records.len(),
            map.slots.len(),
            map.rejected.len()
        );
        map
    }

    fn absorb(&mut self, record: &SubmissionRecord) {
        for raw in &record.ranges {
            match raw.parse::<TimeRange>() {
                Ok(range) => {
                    for cell in range.cells() {
                        let tally = self.slots.entry(cell).or_default();
                        tally.count += 1;
                        tally.submitters.push(record.submitter_name.clone());
                    }
                }
                Err(reason) => {
                    warn!(
                        "rejecting range {:?} from {}: {}",
                        raw, record.submitter_name, reason
                    );
                    self.rejected.push(RejectedRange {
                        submitter_name: record.submitter_name.clone(),
                        range: raw.clone(),
                        reason,
                    });
                }
            }
        }
    }

    pub fn count(&self, cell: Cell) -> u32 {
        self.slots.get(&cell).map_or(0, |tally| tally.count)
    }

    /// Names of everyone whose submission covers `cell`, in record order.
    pub fn submitters(&self, cell: Cell) -> &[String] {
        self.slots
            .get(&cell)
            .map(|tally| tally.submitters.as_slice())
            .unwrap_or(&[])
    }

    pub fn tally(&self, cell: Cell) -> Option<&SlotTally> {
        self.slots.get(&cell)
    }

    /// Highest count over all populated sub-slots, floored at 1 so density
    /// ratios never divide by zero. An empty map yields 0; the color mapper
    /// treats that as ratio 0.
    pub fn max_count(&self) -> u32 {
        self.slots
            .values()
            .map(|tally| tally.count)
            .max()
            .map_or(0, |max| max.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> Iter<'_, Cell, SlotTally> {
        self.slots.iter()
    }

    /// Ranges excluded from aggregation, with the reason each was refused.
    pub fn rejected(&self) -> &[RejectedRange] {
        &self.rejected
    }
}
