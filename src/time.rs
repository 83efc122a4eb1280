use core::fmt;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Minutes covered by one grid slot.
pub const SLOT_MINUTES: u16 = 30;

/// Minutes from midnight to the first slot of the day (9:00).
pub const DAY_START_MINUTES: u16 = 9 * 60;

/// Number of selectable slots per day. The grid covers 9:00 through 21:30,
/// so the last slot starts at 21:00 and slot *boundaries* run 0..=25.
pub const SLOTS_PER_DAY: u8 = 25;

/// Weekday of the scheduling grid, Monday through Friday.
///
/// Ordering follows the grid's fixed column order.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }

    pub fn from_name(name: &str) -> Option<Day> {
        Day::ALL.into_iter().find(|day| day.name() == name)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One 30-minute grid cell: the atomic unit of selection, display and
/// aggregation. `slot` is the half-hour index within the day, `0` being
/// the 9:00-9:30 bucket.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell {
    pub day: Day,
    pub slot: u8,
}

impl Cell {
    pub fn new(day: Day, slot: u8) -> Cell {
        Cell { day, slot }
    }
}

/// Formats a slot boundary as the grid's time label: hour unpadded below 10,
/// minutes always two digits.
///
/// # Examples
/// ```
/// use rota_libs::time::slot_label;
///
/// assert_eq!(slot_label(0), "9:00");
/// assert_eq!(slot_label(1), "9:30");
/// assert_eq!(slot_label(25), "21:30");
/// ```
pub fn slot_label(boundary: u8) -> String {
    let minutes = DAY_START_MINUTES + u16::from(boundary) * SLOT_MINUTES;
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// A range string that could not be mapped onto the slot grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("unrecognized day in {0:?}")]
    UnknownDay(String),
    #[error("malformed time range {0:?}")]
    MalformedTime(String),
    #[error("{0:?} is not on a 30-minute boundary within the 9:00-21:30 window")]
    OffGrid(String),
    #[error("range {0:?} does not span a positive whole number of 30-minute slots")]
    EmptySpan(String),
}

/// Half-open run of contiguous slots on one day. `end` is the exclusive
/// upper boundary, so a range always spans `end - start` slots.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimeRange {
    pub day: Day,
    pub start: u8,
    pub end: u8,
}

impl TimeRange {
    /// Construct a new range over `[start, end)` slot boundaries.
    ///
    /// # Examples
    /// ```
    /// use rota_libs::time::{Day, TimeRange};
    ///
    /// let range = TimeRange::new(Day::Monday, 0, 2);
    /// assert_eq!(range.slots(), 2);
    /// ```
    pub fn new(day: Day, start: u8, end: u8) -> TimeRange {
        TimeRange { day, start, end }
    }

    /// Number of 30-minute slots the range spans.
    pub fn slots(self) -> u8 {
        self.end.saturating_sub(self.start)
    }

    /// Cells covered by this range, in ascending slot order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (self.start..self.end).map(move |slot| Cell::new(self.day, slot))
    }

    /// The formatted label used for storage and optimizer interop.
    ///
    /// # Examples
    /// ```
    /// use rota_libs::time::{Day, TimeRange};
    ///
    /// let range = TimeRange::new(Day::Monday, 0, 2);
    /// assert_eq!(range.label(), "Monday 9:00-10:00");
    /// ```
    pub fn label(self) -> String {
        format!(
            "{} {}-{}",
            self.day,
            slot_label(self.start),
            slot_label(self.end)
        )
    }
}

/// Maps an `H:MM` label to its slot boundary index.
fn parse_boundary(text: &str, raw: &str) -> Result<u8, RangeError> {
    let (hour, minute) = text
        .split_once(':')
        .ok_or_else(|| RangeError::MalformedTime(raw.to_string()))?;
    let hour: u16 = hour
        .parse()
        .map_err(|_| RangeError::MalformedTime(raw.to_string()))?;
    let minute: u16 = minute
        .parse()
        .map_err(|_| RangeError::MalformedTime(raw.to_string()))?;
    if minute >= 60 || minute % SLOT_MINUTES != 0 {
        return Err(RangeError::OffGrid(raw.to_string()));
    }
    let minutes = hour * 60 + minute;
    let end_boundary = DAY_START_MINUTES + u16::from(SLOTS_PER_DAY) * SLOT_MINUTES;
    if minutes < DAY_START_MINUTES || minutes > end_boundary {
        return Err(RangeError::OffGrid(raw.to_string()));
    }
    Ok(((minutes - DAY_START_MINUTES) / SLOT_MINUTES) as u8)
}

impl FromStr for TimeRange {
    type Err = RangeError;

    /// Parses a formatted range label back onto the slot grid. This is the
    /// gate that keeps malformed ranges (off-grid times, reversed or empty
    /// spans) out of aggregation.
    ///
    /// # Examples
    /// ```
    /// use rota_libs::time::{Day, RangeError, TimeRange};
    ///
    /// let range: TimeRange = "Monday 9:00-10:00".parse().unwrap();
    /// assert_eq!(range, TimeRange::new(Day::Monday, 0, 2));
    ///
    /// let err = "Monday 9:00-9:45".parse::<TimeRange>().unwrap_err();
    /// assert!(matches!(err, RangeError::OffGrid(_)));
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (day, times) = raw
            .split_once(' ')
            .ok_or_else(|| RangeError::MalformedTime(raw.to_string()))?;
        let day = Day::from_name(day).ok_or_else(|| RangeError::UnknownDay(raw.to_string()))?;
        let (start, end) = times
            .split_once('-')
            .ok_or_else(|| RangeError::MalformedTime(raw.to_string()))?;
        let start = parse_boundary(start, raw)?;
        let end = parse_boundary(end, raw)?;
        if start >= end {
            return Err(RangeError::EmptySpan(raw.to_string()));
        }
        Ok(TimeRange::new(day, start, end))
    }
}

pub trait Compress {
    fn compress(self) -> Vec<TimeRange>;
}

impl<'a, T> Compress for T
where
    T: Iterator<Item = &'a Cell>,
{
    /// Collapses selected cells into the minimal covering set of maximal
    /// contiguous ranges, days in Monday-Friday order, slots ascending.
    /// No emitted range can be split further or merged with a neighbor.
    ///
    /// # Examples
    /// ```
    /// use rota_libs::time::{Cell, Compress, Day, TimeRange};
    ///
    /// let cells = vec![
    ///     Cell::new(Day::Monday, 3),
    ///     Cell::new(Day::Monday, 0),
    ///     Cell::new(Day::Monday, 1),
    /// ];
    ///
    /// assert_eq!(
    ///     cells.iter().compress(),
    ///     vec![
    ///         TimeRange::new(Day::Monday, 0, 2),
    ///         TimeRange::new(Day::Monday, 3, 4),
    ///     ]
    /// );
    /// ```
    fn compress(self) -> Vec<TimeRange> {
        let mut ranges: Vec<TimeRange> = Vec::new();

        for cell in self.copied().sorted_unstable().dedup() {
            match ranges.last_mut() {
                Some(last) if last.day == cell.day && last.end == cell.slot => {
                    last.end += 1;
                }
                _ => ranges.push(TimeRange::new(cell.day, cell.slot, cell.slot + 1)),
            }
        }

        ranges
    }
}

pub trait Segmented {
    fn segmented(self) -> Vec<TimeRange>;
}

impl<'a, T> Segmented for T
where
    T: Iterator<Item = &'a TimeRange>,
{
    /// Splits each range into unit 30-minute sub-slots covering it
    /// contiguously with no gaps or overlaps. A reversed or empty range
    /// contributes nothing.
    ///
    /// # Examples
    /// ```
    /// use rota_libs::time::{Day, Segmented, TimeRange};
    ///
    /// let ranges = vec![TimeRange::new(Day::Monday, 2, 4)];
    ///
    /// assert_eq!(
    ///     ranges.iter().segmented(),
    ///     vec![
    ///         TimeRange::new(Day::Monday, 2, 3),
    ///         TimeRange::new(Day::Monday, 3, 4),
    ///     ]
    /// );
    /// ```
    fn segmented(self) -> Vec<TimeRange> {
        self.flat_map(|range| {
            (range.start..range.end).map(move |slot| TimeRange::new(range.day, slot, slot + 1))
        })
        .collect_vec()
    }
}
