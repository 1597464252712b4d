//! Segment and road point identity types.

use crate::weight::RouteWeight;

/// Numeric map-tile identifier.
pub type MwmId = u16;

/// Tile id for segments that only exist inside the access blob or as synthetic
/// search endpoints. Numeric tile ids are transient and never serialized.
pub const FAKE_MWM_ID: MwmId = MwmId::MAX;

/// A point on a road feature, addressed by its index in the feature geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadPoint {
    pub feature_id: u32,
    pub point_id: u32,
}

impl RoadPoint {
    pub fn new(feature_id: u32, point_id: u32) -> Self {
        RoadPoint {
            feature_id,
            point_id,
        }
    }
}

impl std::fmt::Display for RoadPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.feature_id, self.point_id)
    }
}

/// A directed unit of travel along one indexed piece of a road feature.
///
/// Inside the access blob the segment index is overloaded: 0 is the wildcard
/// addressing the whole feature, and index `n + 1` addresses point `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub mwm_id: MwmId,
    pub feature_id: u32,
    pub segment_idx: u32,
    pub forward: bool,
}

impl Segment {
    pub fn new(mwm_id: MwmId, feature_id: u32, segment_idx: u32, forward: bool) -> Self {
        Segment {
            mwm_id,
            feature_id,
            segment_idx,
            forward,
        }
    }
}

// Codec sort order: (feature id, segment idx, direction).
impl Ord for Segment {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.feature_id, self.segment_idx, self.forward).cmp(&(
            other.feature_id,
            other.segment_idx,
            other.forward,
        ))
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A weighted graph edge leading to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentEdge {
    pub target: Segment,
    pub weight: RouteWeight,
}

impl SegmentEdge {
    pub fn new(target: Segment, weight: RouteWeight) -> Self {
        SegmentEdge { target, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_ordering() {
        let mut segs = [
            Segment::new(FAKE_MWM_ID, 7, 0, true),
            Segment::new(FAKE_MWM_ID, 5, 2, false),
            Segment::new(FAKE_MWM_ID, 5, 0, true),
            Segment::new(FAKE_MWM_ID, 5, 2, true),
        ];
        segs.sort();
        assert_eq!(segs[0], Segment::new(FAKE_MWM_ID, 5, 0, true));
        assert_eq!(segs[1], Segment::new(FAKE_MWM_ID, 5, 2, false));
        assert_eq!(segs[2], Segment::new(FAKE_MWM_ID, 5, 2, true));
        assert_eq!(segs[3], Segment::new(FAKE_MWM_ID, 7, 0, true));
    }
}
