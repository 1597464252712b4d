//! Binary file formats.

pub mod road_access;

pub use road_access::{deserialize, serialize, CodecError, RoadAccessByVehicle};
