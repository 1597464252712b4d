//! Leap graph: a reduced graph of precomputed long-range shortcut edges,
//! presented to an A*-style search.
//!
//! Everywhere except the synthetic start and finish the search expands cheap,
//! bounded sets of precomputed leap edges. The true start and finish segments
//! connect through genuine local edges supplied by the detailed-graph adapter,
//! so routes begin and end exactly where the query asked.

use crate::geo::{haversine_distance, LatLon};
use crate::segment::{Segment, SegmentEdge};
use crate::weight::RouteWeight;

/// The graph contract a weighted shortest-path search consumes.
///
/// Edge lists are freshly computed on every call; implementations never
/// append to previously returned collections.
pub trait WeightedGraph {
    type Vertex;
    type Edge;
    type Weight;

    fn outgoing_edges(&self, vertex: &Self::Vertex) -> Vec<Self::Edge>;
    fn ingoing_edges(&self, vertex: &Self::Vertex) -> Vec<Self::Edge>;

    /// Admissible lower bound on the remaining cost from `from` to `to`.
    /// `heuristic_cost(x, x)` is zero.
    fn heuristic_cost(&self, from: &Self::Vertex, to: &Self::Vertex) -> Self::Weight;

    /// Tolerance added to cost comparisons so numerically equal paths are not
    /// treated as strictly ordered.
    fn weight_epsilon(&self) -> Self::Weight;
}

/// The detailed street-level graph the leap graph wraps.
///
/// Supplies the synthetic query endpoints, true local edges around them,
/// precomputed leap edges for everything else, and coordinate resolution.
pub trait DetailedGraph {
    fn start_segment(&self) -> Segment;
    fn finish_segment(&self) -> Segment;

    /// True street-level edges adjacent to `segment`.
    fn local_edges(&self, segment: &Segment, outgoing: bool) -> Vec<SegmentEdge>;

    /// The precomputed bounded shortcut expansion for `segment`.
    fn leap_edges(&self, segment: &Segment, outgoing: bool) -> Vec<SegmentEdge>;

    /// Resolves one endpoint of `segment` to a coordinate.
    fn point(&self, segment: &Segment, front: bool) -> LatLon;

    /// Upper bound on travel speed in m/s. Keeps the heuristic admissible.
    fn max_speed_mps(&self) -> f64;

    fn weight_epsilon(&self) -> RouteWeight {
        RouteWeight::new(1e-6)
    }
}

/// One search invocation's view of the leap graph. Constructed per query and
/// discarded after; every call is a pure function of the construction-time
/// state and the adapter's data.
pub struct LeapsGraph<'a, G: DetailedGraph> {
    start_point: LatLon,
    finish_point: LatLon,
    start_segment: Segment,
    finish_segment: Segment,
    graph: &'a G,
}

impl<'a, G: DetailedGraph> LeapsGraph<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        let start_segment = graph.start_segment();
        let finish_segment = graph.finish_segment();
        LeapsGraph {
            start_point: graph.point(&start_segment, true),
            finish_point: graph.point(&finish_segment, true),
            start_segment,
            finish_segment,
            graph,
        }
    }

    pub fn start_segment(&self) -> &Segment {
        &self.start_segment
    }

    pub fn finish_segment(&self) -> &Segment {
        &self.finish_segment
    }

    /// Resolves a segment endpoint. The synthetic endpoints resolve to the
    /// stored query coordinates; everything else goes to the adapter.
    pub fn point(&self, segment: &Segment, front: bool) -> LatLon {
        if *segment == self.start_segment {
            self.start_point
        } else if *segment == self.finish_segment {
            self.finish_point
        } else {
            self.graph.point(segment, front)
        }
    }

    fn edges(&self, segment: &Segment, outgoing: bool) -> Vec<SegmentEdge> {
        if outgoing && *segment == self.start_segment {
            // The start connects through genuine local edges.
            return self.graph.local_edges(segment, true);
        }
        if !outgoing && *segment == self.finish_segment {
            return self.graph.local_edges(segment, false);
        }
        self.graph.leap_edges(segment, outgoing)
    }
}

impl<G: DetailedGraph> WeightedGraph for LeapsGraph<'_, G> {
    type Vertex = Segment;
    type Edge = SegmentEdge;
    type Weight = RouteWeight;

    fn outgoing_edges(&self, segment: &Segment) -> Vec<SegmentEdge> {
        self.edges(segment, true)
    }

    fn ingoing_edges(&self, segment: &Segment) -> Vec<SegmentEdge> {
        self.edges(segment, false)
    }

    fn heuristic_cost(&self, from: &Segment, to: &Segment) -> RouteWeight {
        let distance = haversine_distance(self.point(from, true), self.point(to, true));
        RouteWeight::new(distance / self.graph.max_speed_mps())
    }

    fn weight_epsilon(&self) -> RouteWeight {
        self.graph.weight_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::FAKE_MWM_ID;

    const START: Segment = Segment {
        mwm_id: FAKE_MWM_ID,
        feature_id: u32::MAX - 1,
        segment_idx: 0,
        forward: true,
    };
    const FINISH: Segment = Segment {
        mwm_id: FAKE_MWM_ID,
        feature_id: u32::MAX - 2,
        segment_idx: 0,
        forward: true,
    };

    /// Two-leap toy network: start at Monaco, finish near Nice, one ordinary
    /// segment in between.
    struct ToyGraph;

    const MID: Segment = Segment {
        mwm_id: 1,
        feature_id: 10,
        segment_idx: 0,
        forward: true,
    };

    impl DetailedGraph for ToyGraph {
        fn start_segment(&self) -> Segment {
            START
        }

        fn finish_segment(&self) -> Segment {
            FINISH
        }

        fn local_edges(&self, segment: &Segment, outgoing: bool) -> Vec<SegmentEdge> {
            if *segment == START && outgoing {
                return vec![SegmentEdge::new(MID, RouteWeight::new(30.0))];
            }
            if *segment == FINISH && !outgoing {
                return vec![SegmentEdge::new(MID, RouteWeight::new(45.0))];
            }
            Vec::new()
        }

        fn leap_edges(&self, segment: &Segment, outgoing: bool) -> Vec<SegmentEdge> {
            if *segment == MID && outgoing {
                return vec![SegmentEdge::new(FINISH, RouteWeight::new(600.0))];
            }
            if *segment == MID && !outgoing {
                return vec![SegmentEdge::new(START, RouteWeight::new(600.0))];
            }
            Vec::new()
        }

        fn point(&self, segment: &Segment, _front: bool) -> LatLon {
            if *segment == START {
                LatLon::new(43.7384, 7.4246)
            } else if *segment == FINISH {
                LatLon::new(43.7102, 7.2620)
            } else {
                LatLon::new(43.7270, 7.3400)
            }
        }

        fn max_speed_mps(&self) -> f64 {
            33.0 // ~120 km/h
        }
    }

    #[test]
    fn test_start_outgoing_delegates_to_local_edges() {
        let toy = ToyGraph;
        let leaps = LeapsGraph::new(&toy);
        let edges = leaps.outgoing_edges(leaps.start_segment());
        assert_eq!(edges, vec![SegmentEdge::new(MID, RouteWeight::new(30.0))]);
    }

    #[test]
    fn test_finish_ingoing_delegates_to_local_edges() {
        let toy = ToyGraph;
        let leaps = LeapsGraph::new(&toy);
        let finish = *leaps.finish_segment();
        let edges = leaps.ingoing_edges(&finish);
        assert_eq!(edges, vec![SegmentEdge::new(MID, RouteWeight::new(45.0))]);
    }

    #[test]
    fn test_ordinary_segment_gets_only_leap_edges() {
        let toy = ToyGraph;
        let leaps = LeapsGraph::new(&toy);

        let out = leaps.outgoing_edges(&MID);
        assert_eq!(out, vec![SegmentEdge::new(FINISH, RouteWeight::new(600.0))]);

        // Ingoing on a non-finish segment never sees adapter-local edges.
        let ingoing = leaps.ingoing_edges(&MID);
        assert_eq!(
            ingoing,
            vec![SegmentEdge::new(START, RouteWeight::new(600.0))]
        );
    }

    #[test]
    fn test_start_ingoing_is_leap_only() {
        let toy = ToyGraph;
        let leaps = LeapsGraph::new(&toy);
        assert!(leaps.ingoing_edges(leaps.start_segment()).is_empty());
    }

    #[test]
    fn test_heuristic_is_zero_on_self_and_admissible() {
        let toy = ToyGraph;
        let leaps = LeapsGraph::new(&toy);
        let start = *leaps.start_segment();
        let finish = *leaps.finish_segment();

        assert_eq!(leaps.heuristic_cost(&start, &start), RouteWeight::ZERO);
        assert_eq!(leaps.heuristic_cost(&finish, &finish), RouteWeight::ZERO);

        let h = leaps.heuristic_cost(&start, &finish);
        assert!(h.is_finite());
        assert!(h > RouteWeight::ZERO);
        // Never more than the real 30s + 600s + 45s path.
        assert!(h < RouteWeight::new(675.0));
    }

    #[test]
    fn test_point_resolution() {
        let toy = ToyGraph;
        let leaps = LeapsGraph::new(&toy);
        assert_eq!(
            leaps.point(leaps.start_segment(), true),
            LatLon::new(43.7384, 7.4246)
        );
        assert_eq!(leaps.point(&MID, true), LatLon::new(43.7270, 7.3400));
    }

    #[test]
    fn test_weight_epsilon_positive() {
        let toy = ToyGraph;
        let leaps = LeapsGraph::new(&toy);
        let eps = leaps.weight_epsilon();
        assert!(eps > RouteWeight::ZERO);
        assert!(eps < RouteWeight::new(1.0));
    }
}
