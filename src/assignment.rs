use crate::time::{Cell, RangeError, TimeRange};
use itertools::Itertools;
use std::collections::BTreeMap;
use thiserror::Error;

/// The two competition groups an optimized schedule assigns volunteers to.
/// Declaration order is resolution order: Competition 1 always wins when a
/// slot somehow matches both.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Group {
    CompetitionOne,
    CompetitionTwo,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::CompetitionOne, Group::CompetitionTwo];

    /// The group's name as it appears in optimizer labels.
    pub fn title(self) -> &'static str {
        match self {
            Group::CompetitionOne => "Competition 1",
            Group::CompetitionTwo => "Competition 2",
        }
    }

    /// Fixed overlay color for slots covered by this group.
    pub fn css_color(self) -> &'static str {
        match self {
            Group::CompetitionOne => "yellow",
            Group::CompetitionTwo => "purple",
        }
    }
}

/// An optimizer label that could not be interpreted.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum LabelError {
    #[error("label {0:?} names no known volunteer group")]
    UnknownGroup(String),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// One labeled slot of the optimized schedule: a group, the range it runs
/// over, and the volunteers assigned to it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Assignment {
    pub group: Group,
    pub range: TimeRange,
    pub volunteers: Vec<String>,
}

impl Assignment {
    /// The label string this assignment travels under, reproduced bit-exact
    /// for optimizer interop.
    ///
    /// # Examples
    /// ```
    /// use rota_libs::assignment::{Assignment, Group};
    /// use rota_libs::time::{Day, TimeRange};
    ///
    /// let assignment = Assignment {
    ///     group: Group::CompetitionOne,
    ///     range: TimeRange::new(Day::Monday, 2, 4),
    ///     volunteers: vec!["Alice".to_string()],
    /// };
    ///
    /// assert_eq!(
    ///     assignment.label(),
    ///     "Competition 1 Volunteers on Monday 10:00-11:00"
    /// );
    /// ```
    pub fn label(&self) -> String {
        format!("{} Volunteers on {}", self.group.title(), self.range.label())
    }

    /// Whether a rendered grid cell falls under this assignment. A cell is
    /// covered when it shares the assignment's day and one of its
    /// boundaries: the cell starts where the assignment starts, or ends
    /// where it ends. This mirrors the label-substring rule the original
    /// admin view applied (`"{start}-"` or `"-{end}"` containment).
    pub fn covers(&self, cell: Cell) -> bool {
        self.range.day == cell.day
            && (self.range.start == cell.slot || self.range.end == cell.slot + 1)
    }
}

/// The optimizer's output: labeled group slots with their assigned
/// volunteer names. Structured form is primary; the label map is handled by
/// the [`AssignmentMap::from_labels`] compatibility adapter.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AssignmentMap {
    assignments: Vec<Assignment>,
}

/// What the overlay resolver decided for one rendered slot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Overlay<'a> {
    /// Covered by an assignment: render the group color, click through to
    /// the assigned volunteers.
    Assigned {
        group: Group,
        volunteers: &'a [String],
    },
    /// Not covered: defer to the density map.
    Unassigned,
}

impl AssignmentMap {
    pub fn new(assignments: Vec<Assignment>) -> AssignmentMap {
        let assignments = assignments
            .into_iter()
            .sorted_by_key(|assignment| (assignment.group, assignment.range))
            .collect();
        AssignmentMap { assignments }
    }

    /// Adapter for an optimizer that emits the loose label map. Every key
    /// must parse; a single bad label fails the whole response so a decode
    /// slip never half-applies a schedule.
    pub fn from_labels(labels: &BTreeMap<String, Vec<String>>) -> Result<AssignmentMap, LabelError> {
        let assignments = labels
            .iter()
            .map(|(label, volunteers)| {
                let (group, rest) = Group::ALL
                    .into_iter()
                    .find_map(|group| {
                        label
                            .strip_prefix(group.title())
                            .and_then(|rest| rest.strip_prefix(" Volunteers on "))
                            .map(|rest| (group, rest))
                    })
                    .ok_or_else(|| LabelError::UnknownGroup(label.clone()))?;
                Ok(Assignment {
                    group,
                    range: rest.parse::<TimeRange>()?,
                    volunteers: volunteers.clone(),
                })
            })
            .collect::<Result<Vec<_>, LabelError>>()?;
        Ok(AssignmentMap::new(assignments))
    }

    /// Round-trips back to the optimizer's label map form.
    pub fn labels(&self) -> BTreeMap<String, Vec<String>> {
        self.assignments
            .iter()
            .map(|assignment| (assignment.label(), assignment.volunteers.clone()))
            .collect()
    }

    /// Resolves the overlay for one rendered cell. Groups are tried in
    /// declaration order, so Competition 1 deterministically shadows
    /// Competition 2 even on (incorrect) double matches.
    pub fn resolve(&self, cell: Cell) -> Overlay<'_> {
        for group in Group::ALL {
            if let Some(assignment) = self
                .assignments
                .iter()
                .find(|assignment| assignment.group == group && assignment.covers(cell))
            {
                return Overlay::Assigned {
                    group,
                    volunteers: &assignment.volunteers,
                };
            }
        }
        Overlay::Unassigned
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
