//! Curve data types

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Identifies one curve. The aperture is kept as its label so that readings
/// with distinct labels never merge, whatever their float values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub iso: i32,
    pub aperture_label: String,
}

impl GroupKey {
    pub fn new(iso: i32, aperture_label: impl Into<String>) -> Self {
        Self {
            iso,
            aperture_label: aperture_label.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISO: {} Iris: {}", self.iso, self.aperture_label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveGroup {
    pub key: GroupKey,
    /// Points in input order
    pub points: Vec<Point>,
}

/// All curves of one run, iterated in the order their keys were first seen.
#[derive(Debug, Clone, Default)]
pub struct CurveFamily {
    groups: Vec<CurveGroup>,
    index: HashMap<GroupKey, usize>,
}

impl CurveFamily {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `point` to the group for `key`, creating the group on first use.
    pub fn push(&mut self, key: GroupKey, point: Point) {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                self.index.insert(key.clone(), slot);
                self.groups.push(CurveGroup {
                    key,
                    points: Vec::new(),
                });
                slot
            }
        };
        self.groups[slot].points.push(point);
    }

    pub fn get(&self, key: &GroupKey) -> Option<&CurveGroup> {
        self.index.get(key).map(|&slot| &self.groups[slot])
    }

    pub fn groups(&self) -> &[CurveGroup] {
        &self.groups
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [CurveGroup] {
        &mut self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Highest brightness seen per ISO.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakBrightness {
    peaks: HashMap<i32, u64>,
}

impl PeakBrightness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, iso: i32, brightness: u64) {
        let peak = self.peaks.entry(iso).or_insert(0);
        if *peak < brightness {
            *peak = brightness;
        }
    }

    /// Peak for `iso`, or 0 when nothing was observed.
    pub fn get(&self, iso: i32) -> u64 {
        self.peaks.get(&iso).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}

/// A labeled point sequence ready for the plot renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<Point>,
}
