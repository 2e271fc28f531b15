use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::ingest::RawReading;

/// Partition of a reading sequence by stage index.
///
/// Built once in `O(n)`; [`first_of`](Self::first_of) and
/// [`last_of`](Self::last_of) are `O(1)` afterwards. The input is never mutated
/// and stage numbers need not be contiguous or start anywhere in particular.
#[derive(Debug, Clone)]
pub struct StageSegmenter<'a> {
    readings: &'a [RawReading],
    index: BTreeMap<i64, Vec<usize>>,
    // stage -> (first, last) position
    bounds: HashMap<i64, (usize, usize)>,
}

/// The rows of one stage, in original order. Empty when the stage is absent.
#[derive(Debug, Clone, Copy)]
pub struct StageSlice<'s> {
    stage: i64,
    readings: &'s [RawReading],
    indices: &'s [usize],
}

/// Row count and time span of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    /// Stage index
    pub stage: i64,
    /// Number of readings
    pub rows: usize,
    /// Time since test start at the first reading (s)
    pub first_time: f64,
    /// Time since test start at the last reading (s)
    pub last_time: f64,
}

impl<'a> StageSegmenter<'a> {
    /// Index `readings` by stage.
    pub fn new(readings: &'a [RawReading]) -> Self {
        let mut index: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut bounds: HashMap<i64, (usize, usize)> = HashMap::new();
        for (i, reading) in readings.iter().enumerate() {
            index.entry(reading.stage).or_default().push(i);
            bounds
                .entry(reading.stage)
                .and_modify(|(_, last)| *last = i)
                .or_insert((i, i));
        }
        Self {
            readings,
            index,
            bounds,
        }
    }

    /// The underlying reading sequence
    pub fn readings(&self) -> &'a [RawReading] {
        self.readings
    }

    /// First reading of the whole record
    pub fn first(&self) -> Option<&'a RawReading> {
        self.readings.first()
    }

    /// Rows belonging to `stage`.
    pub fn stage(&self, stage: i64) -> StageSlice<'_> {
        let indices = self.index.get(&stage).map(Vec::as_slice).unwrap_or(&[]);
        StageSlice {
            stage,
            readings: self.readings,
            indices,
        }
    }

    /// First reading of `stage`
    pub fn first_of(&self, stage: i64) -> Option<&'a RawReading> {
        self.bounds.get(&stage).map(|&(first, _)| &self.readings[first])
    }

    /// Last reading of `stage`
    pub fn last_of(&self, stage: i64) -> Option<&'a RawReading> {
        self.bounds.get(&stage).map(|&(_, last)| &self.readings[last])
    }

    /// Positions (into the original sequence) of every row whose stage lies in
    /// `from..=to`, in original order.
    pub fn indices_in_range(&self, from: i64, to: i64) -> Vec<usize> {
        if from > to {
            return Vec::new();
        }
        let mut indices: Vec<usize> = self
            .index
            .range(from..=to)
            .flat_map(|(_, rows)| rows.iter().copied())
            .collect();
        // stages are normally non-decreasing; sorting keeps file order otherwise
        indices.sort_unstable();
        indices
    }

    /// Every row whose stage lies in `from..=to`, in original order.
    pub fn rows_in_range(&self, from: i64, to: i64) -> Vec<&'a RawReading> {
        self.indices_in_range(from, to)
            .into_iter()
            .map(|i| &self.readings[i])
            .collect()
    }

    /// Distinct stage numbers in ascending order
    pub fn stages(&self) -> impl Iterator<Item = i64> + '_ {
        self.index.keys().copied()
    }

    /// Row count and time span per stage.
    pub fn summaries(&self) -> Vec<StageSummary> {
        self.index
            .iter()
            .map(|(&stage, rows)| {
                let time = |i: Option<&usize>| i.map(|&i| self.readings[i].time_test).unwrap_or(0.0);
                StageSummary {
                    stage,
                    rows: rows.len(),
                    first_time: time(rows.first()),
                    last_time: time(rows.last()),
                }
            })
            .collect()
    }
}

impl<'s> StageSlice<'s> {
    /// Stage index this slice was requested for
    pub fn stage(&self) -> i64 {
        self.stage
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the stage is absent
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// First row of the stage
    pub fn first(&self) -> Option<&'s RawReading> {
        self.indices.first().map(|&i| &self.readings[i])
    }

    /// Last row of the stage
    pub fn last(&self) -> Option<&'s RawReading> {
        self.indices.last().map(|&i| &self.readings[i])
    }

    /// Positions of the rows in the original sequence
    pub fn indices(&self) -> &'s [usize] {
        self.indices
    }

    /// Iterate the rows in original order
    pub fn iter(&self) -> impl Iterator<Item = &'s RawReading> + 's {
        let (readings, indices) = (self.readings, self.indices);
        indices.iter().map(move |&i| &readings[i])
    }
}
