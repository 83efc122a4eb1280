use crate::assignment::{AssignmentMap, Group, LabelError, Overlay};
use crate::color::{density_color, Rgb};
use crate::heatmap::HeatMap;
use crate::submission::{roster, SubmissionRecord, Volunteer};
use crate::time::Cell;
use crate::week::monday_history;
use chrono::NaiveDate;
use core::fmt;
use log::{debug, warn};
use thiserror::Error;

/// Failure talking to the optimizer collaborator. The board logs it and
/// keeps the previous assignment map (fail-silent); the user re-triggers
/// the optimize action manually.
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[cfg(feature = "client")]
    #[error("optimizer request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("optimizer response could not be interpreted: {0}")]
    Label(#[from] LabelError),
}

/// Final color decision for a rendered slot: assignment overlay if covered,
/// otherwise the density gradient.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlotColor {
    Assigned(Group),
    Density(Rgb),
}

impl fmt::Display for SlotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotColor::Assigned(group) => f.write_str(group.css_color()),
            SlotColor::Density(rgb) => fmt::Display::fmt(rgb, f),
        }
    }
}

/// Admin view state: the selected week, its derived aggregates, and the
/// optimized schedule overlay.
///
/// All fetches are asynchronous to the UI; their results arrive through the
/// `apply_*` methods tagged with the week they were issued for. A result
/// whose tag no longer matches the selected week is discarded, so a slow
/// response can never clobber a newer week's data. The heatmap-oriented and
/// roster-oriented fetches populate disjoint state and may land in either
/// order.
#[derive(Debug, Clone)]
pub struct AdminBoard {
    weeks: [NaiveDate; 4],
    selected_week: NaiveDate,
    heatmap: HeatMap,
    volunteers: Vec<Volunteer>,
    assignments: AssignmentMap,
    selected_cell: Option<Cell>,
}

impl AdminBoard {
    /// Builds the board for the week picker derived from `today`.
    pub fn new(today: NaiveDate) -> AdminBoard {
        let weeks = monday_history(today);
        AdminBoard {
            weeks,
            selected_week: weeks[0],
            heatmap: HeatMap::default(),
            volunteers: Vec::new(),
            assignments: AssignmentMap::default(),
            selected_cell: None,
        }
    }

    /// Selectable week starts, newest first.
    pub fn weeks(&self) -> &[NaiveDate; 4] {
        &self.weeks
    }

    pub fn selected_week(&self) -> NaiveDate {
        self.selected_week
    }

    /// Switches the displayed week. Existing aggregates stay on screen
    /// until the new week's fetches land and replace them.
    pub fn select_week(&mut self, week: NaiveDate) {
        self.selected_week = week;
        self.selected_cell = None;
    }

    /// Applies a heatmap-oriented fetch result issued for `week`.
    pub fn apply_submissions(&mut self, week: NaiveDate, records: &[SubmissionRecord]) {
        if week != self.selected_week {
            debug!("discarding stale submissions fetch for week {week}");
            return;
        }
        self.heatmap = HeatMap::from_submissions(records);
    }

    /// Applies a roster-oriented fetch result issued for `week`.
    pub fn apply_roster(&mut self, week: NaiveDate, records: &[SubmissionRecord]) {
        if week != self.selected_week {
            debug!("discarding stale roster fetch for week {week}");
            return;
        }
        self.volunteers = roster(records);
    }

    /// Applies an optimize call's outcome issued for `week`. A failure
    /// leaves the previous assignment map untouched.
    pub fn apply_assignments(
        &mut self,
        week: NaiveDate,
        result: Result<AssignmentMap, OptimizerError>,
    ) {
        if week != self.selected_week {
            debug!("discarding stale optimize result for week {week}");
            return;
        }
        match result {
            Ok(assignments) => self.assignments = assignments,
            Err(err) => warn!("optimize failed, keeping previous assignments: {err}"),
        }
    }

    pub fn heatmap(&self) -> &HeatMap {
        &self.heatmap
    }

    pub fn volunteers(&self) -> &[Volunteer] {
        &self.volunteers
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    /// Color for one rendered cell: overlay precedence first (Competition 1
    /// yellow, then Competition 2 purple), else the density gradient.
    pub fn slot_color(&self, cell: Cell) -> SlotColor {
        match self.assignments.resolve(cell) {
            Overlay::Assigned { group, .. } => SlotColor::Assigned(group),
            Overlay::Unassigned => SlotColor::Density(density_color(
                self.heatmap.count(cell),
                self.heatmap.max_count(),
            )),
        }
    }

    /// Click-through name list for a cell: the assigned volunteers when the
    /// cell is covered, otherwise everyone available per the heatmap.
    pub fn slot_volunteer_names(&self, cell: Cell) -> Vec<String> {
        match self.assignments.resolve(cell) {
            Overlay::Assigned { volunteers, .. } => volunteers.to_vec(),
            Overlay::Unassigned => self.heatmap.submitters(cell).to_vec(),
        }
    }

    /// Records which cell the admin clicked.
    pub fn click(&mut self, cell: Cell) {
        self.selected_cell = Some(cell);
    }

    pub fn selected_cell(&self) -> Option<Cell> {
        self.selected_cell
    }

    /// Volunteers for the side list: those behind the clicked cell, or the
    /// whole roster when nothing is selected.
    pub fn listed_volunteers(&self) -> Vec<&Volunteer> {
        match self.selected_cell {
            Some(cell) => {
                let names = self.slot_volunteer_names(cell);
                self.volunteers
                    .iter()
                    .filter(|volunteer| names.contains(&volunteer.name))
                    .collect()
            }
            None => self.volunteers.iter().collect(),
        }
    }
}
