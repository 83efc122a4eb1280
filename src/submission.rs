use crate::selection::Selection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One submitter's availability for one week. Identity is
/// `(submitter_id, week_start)`; submitting again fully replaces the
/// earlier record (last write wins, no merge).
///
/// Field renames match the wire shape the original backend stores.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "uid")]
    pub submitter_id: String,
    #[serde(rename = "userName")]
    pub submitter_name: String,
    #[serde(rename = "weekStart")]
    pub week_start: NaiveDate,
    /// How many events per week the submitter is willing to take, >= 1.
    #[serde(rename = "volunteerTimes")]
    pub times_per_week: u32,
    #[serde(rename = "isDriver")]
    pub willing_to_drive: bool,
    /// Formatted range labels, e.g. `"Monday 9:00-10:00"`.
    #[serde(rename = "selectedTimes")]
    pub ranges: Vec<String>,
}

impl SubmissionRecord {
    /// Builds the record a submit action uploads, compressing the committed
    /// selection into its minimal range labels.
    pub fn from_selection(
        submitter_id: &str,
        submitter_name: &str,
        week_start: NaiveDate,
        times_per_week: u32,
        willing_to_drive: bool,
        selection: &Selection,
    ) -> SubmissionRecord {
        SubmissionRecord {
            submitter_id: submitter_id.to_string(),
            submitter_name: submitter_name.to_string(),
            week_start,
            times_per_week: times_per_week.max(1),
            willing_to_drive,
            ranges: selection.range_labels(),
        }
    }

    /// Upsert key into the submission store.
    pub fn key(&self) -> (&str, NaiveDate) {
        (&self.submitter_id, self.week_start)
    }
}

/// Optimizer-facing view of a submitter, built per request from the week's
/// submission records and never persisted. Serialized camelCase to match
/// the optimizer's expected request shape.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    pub uid: String,
    pub name: String,
    /// Formatted range labels carried over verbatim from the record.
    pub availability: Vec<String>,
    pub can_drive: bool,
    pub max_events: u32,
    pub events_assigned: u32,
}

impl From<&SubmissionRecord> for Volunteer {
    fn from(record: &SubmissionRecord) -> Volunteer {
        Volunteer {
            uid: record.submitter_id.clone(),
            name: record.submitter_name.clone(),
            availability: record.ranges.clone(),
            can_drive: record.willing_to_drive,
            max_events: record.times_per_week,
            events_assigned: 0,
        }
    }
}

impl Volunteer {
    /// Roster display name; drivers are starred.
    pub fn display_name(&self) -> String {
        if self.can_drive {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// The single place volunteer view models are constructed from records.
pub fn roster(records: &[SubmissionRecord]) -> Vec<Volunteer> {
    records.iter().map(Volunteer::from).collect()
}
