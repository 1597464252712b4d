//! Per-vehicle-category road access restrictions.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::segment::RoadPoint;

const ACCESS_NAMES: [&str; 5] = ["No", "Private", "Destination", "Yes", "Count"];

/// Access level applied to a way or a road point.
///
/// `Count` is the iteration bound and the invalid-value marker; it is never a
/// stored restriction.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessType {
    No = 0,
    Private = 1,
    Destination = 2,
    Yes = 3,
    Count = 4,
}

impl AccessType {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [AccessType] {
        &[
            AccessType::No,
            AccessType::Private,
            AccessType::Destination,
            AccessType::Yes,
        ]
    }

    pub fn name(&self) -> &'static str {
        ACCESS_NAMES[*self as usize]
    }

    /// Parses a restriction-type label. Unknown text yields `Count`, which
    /// callers must treat as invalid.
    pub fn from_name(s: &str) -> AccessType {
        for (i, name) in ACCESS_NAMES.iter().enumerate() {
            if *name == s {
                return AccessType::from_u8(i as u8).unwrap_or(AccessType::Count);
            }
        }
        warn!(text = s, "unknown access type text");
        debug_assert!(false, "unknown access type text: {s}");
        AccessType::Count
    }

    pub fn from_u8(v: u8) -> Option<AccessType> {
        match v {
            0 => Some(AccessType::No),
            1 => Some(AccessType::Private),
            2 => Some(AccessType::Destination),
            3 => Some(AccessType::Yes),
            4 => Some(AccessType::Count),
            _ => None,
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vehicle category a restriction table is scoped to.
///
/// The count of 4 is baked into the access blob format version. Adding or
/// removing a category requires a version bump and explicit compatibility
/// handling in the codec.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Pedestrian = 0,
    Bicycle = 1,
    Car = 2,
    Transit = 3,
}

impl VehicleType {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [VehicleType] {
        &[
            VehicleType::Pedestrian,
            VehicleType::Bicycle,
            VehicleType::Car,
            VehicleType::Transit,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            VehicleType::Pedestrian => "pedestrian",
            VehicleType::Bicycle => "bicycle",
            VehicleType::Car => "car",
            VehicleType::Transit => "transit",
        }
    }

    pub fn from_u8(v: u8) -> Option<VehicleType> {
        match v {
            0 => Some(VehicleType::Pedestrian),
            1 => Some(VehicleType::Bicycle),
            2 => Some(VehicleType::Car),
            3 => Some(VehicleType::Transit),
            _ => None,
        }
    }
}

pub type WayToAccess = FxHashMap<u32, AccessType>;
pub type PointToAccess = FxHashMap<RoadPoint, AccessType>;

/// Restriction store for one vehicle category.
///
/// Absent keys mean open access: every lookup that finds nothing returns
/// [`AccessType::Yes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadAccess {
    way_to_access: WayToAccess,
    point_to_access: PointToAccess,
}

impl RoadAccess {
    pub fn new() -> Self {
        RoadAccess::default()
    }

    pub fn way_access(&self, feature_id: u32) -> AccessType {
        self.way_to_access
            .get(&feature_id)
            .copied()
            .unwrap_or(AccessType::Yes)
    }

    /// Point-level lookup, independent of the way-level map. Callers decide
    /// precedence between the two when weighting a concrete segment.
    pub fn point_access(&self, point: RoadPoint) -> AccessType {
        self.point_to_access
            .get(&point)
            .copied()
            .unwrap_or(AccessType::Yes)
    }

    /// Replaces both mappings wholesale.
    pub fn set_access(&mut self, way_to_access: WayToAccess, point_to_access: PointToAccess) {
        self.way_to_access = way_to_access;
        self.point_to_access = point_to_access;
    }

    pub fn way_to_access(&self) -> &WayToAccess {
        &self.way_to_access
    }

    pub fn point_to_access(&self) -> &PointToAccess {
        &self.point_to_access
    }
}

const MAX_ENTRIES_TO_SHOW: usize = 10;

fn write_entries<K: Copy + Ord + fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    map: &FxHashMap<K, AccessType>,
) -> fmt::Result {
    // Hash maps iterate in arbitrary order; sort so logs are stable.
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by_key(|(k, _)| **k);
    for (i, (k, v)) in entries.iter().take(MAX_ENTRIES_TO_SHOW).enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {}", k, v)?;
    }
    if entries.len() > MAX_ENTRIES_TO_SHOW {
        write!(f, ", ...")?;
    }
    Ok(())
}

impl fmt::Display for RoadAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoadAccess {{ Ways [")?;
        write_entries(f, &self.way_to_access)?;
        write!(f, "], Points [")?;
        write_entries(f, &self.point_to_access)?;
        write!(f, "] }}")
    }
}
