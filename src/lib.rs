//! Road access restrictions and the leap graph used by long-range route
//! search.
//!
//! Two tightly related pieces: a compact, randomly-skippable binary encoding
//! of per-vehicle-category access restrictions ([`formats::road_access`]), and
//! a reduced graph of precomputed shortcut edges ([`leaps::LeapsGraph`]) that
//! lets a shortest-path search jump between long-range edges while the real
//! start and finish connect through exact local edges.

pub mod access;
pub mod coding;
pub mod formats;
pub mod geo;
pub mod leaps;
pub mod segment;
pub mod weight;

pub use access::{AccessType, RoadAccess, VehicleType};
pub use formats::road_access::{CodecError, RoadAccessByVehicle};
pub use leaps::{DetailedGraph, LeapsGraph, WeightedGraph};
pub use segment::{RoadPoint, Segment, SegmentEdge};
pub use weight::RouteWeight;
