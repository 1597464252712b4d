//! road_access blob format - per-vehicle-category access restrictions
//!
//! Format (little-endian):
//!
//! Header:
//!   version:       u32 = 1
//!   section_size:  [4]u32  // bytes per vehicle category, category order
//!
//! Body ([4]section, category order):
//!   Each section holds 4 segment lists, one per access type in enumeration
//!   order (No, Private, Destination, Yes). A list is:
//!
//!   count:         varuint
//!   fid deltas:    gamma(delta + 1) per element  // bit stream starts here
//!   segment idxs:  gamma(idx + 1) per element
//!   directions:    1 bit per element
//!   padding:       zero bits to the next byte boundary
//!
//! Way-level restrictions ride in the lists as wildcard segments (idx 0);
//! point-level restrictions as idx = point id + 1. The section sizes let a
//! reader seek straight to the one category it cares about without parsing
//! the others.
//!
//! The version is tied to the category count of 4. Adding or removing a
//! vehicle category requires bumping the version and handling compatibility
//! here; there is no forward-decoding path.

use std::io::{Read, Seek, SeekFrom, Write};

use thiserror::Error;
use tracing::debug;

use crate::access::{AccessType, PointToAccess, RoadAccess, VehicleType, WayToAccess};
use crate::coding::{read_gamma, read_varuint, write_gamma, write_varuint, BitReader, BitWriter};
use crate::segment::{RoadPoint, Segment, FAKE_MWM_ID};

pub const VERSION: u32 = 1;

pub type RoadAccessByVehicle = [RoadAccess; VehicleType::COUNT];

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported road access version {actual} (expected {expected})")]
    VersionMismatch { expected: u32, actual: u32 },

    /// Encoder precondition: segment lists must carry non-decreasing feature
    /// ids so the deltas stay non-negative.
    #[error("feature ids must be non-decreasing: {prev} followed by {next}")]
    UnsortedFeatureIds { prev: u32, next: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What a restriction segment addresses once the index overload is resolved:
/// idx 0 is the whole-feature wildcard, idx `n + 1` is point `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RestrictionTarget {
    Way(u32),
    Point(RoadPoint),
}

impl From<Segment> for RestrictionTarget {
    fn from(seg: Segment) -> Self {
        if seg.segment_idx == 0 {
            RestrictionTarget::Way(seg.feature_id)
        } else {
            RestrictionTarget::Point(RoadPoint::new(seg.feature_id, seg.segment_idx - 1))
        }
    }
}

/// Writes the 4-category table as one blob.
pub fn serialize<W: Write>(sink: &mut W, tables: &RoadAccessByVehicle) -> Result<(), CodecError> {
    sink.write_all(&VERSION.to_le_bytes())?;

    // Sections are staged in memory so the size header can go out first
    // without seeking back over the sink.
    let mut sections: Vec<Vec<u8>> = Vec::with_capacity(tables.len());
    for table in tables {
        let mut buf = Vec::new();
        serialize_section(&mut buf, table)?;
        sections.push(buf);
    }

    for section in &sections {
        sink.write_all(&(section.len() as u32).to_le_bytes())?;
    }
    for section in &sections {
        sink.write_all(section)?;
    }
    Ok(())
}

/// Extracts one vehicle category from a blob, replacing the contents of
/// `access`. Non-target sections are skipped by size, never parsed.
pub fn deserialize<R: Read + Seek>(
    src: &mut R,
    vehicle: VehicleType,
    access: &mut RoadAccess,
) -> Result<(), CodecError> {
    let version = read_u32(src)?;
    if version != VERSION {
        return Err(CodecError::VersionMismatch {
            expected: VERSION,
            actual: version,
        });
    }

    let mut section_sizes = [0u32; VehicleType::COUNT];
    for size in &mut section_sizes {
        *size = read_u32(src)?;
    }

    for (i, &size) in section_sizes.iter().enumerate().take(vehicle as usize) {
        debug!(section = i, bytes = size, "skipping access section");
        src.seek(SeekFrom::Current(i64::from(size)))?;
    }

    let (way_to_access, point_to_access) = deserialize_section(src)?;
    access.set_access(way_to_access, point_to_access);
    Ok(())
}

fn read_u32<R: Read>(src: &mut R) -> std::io::Result<u32> {
    let mut word = [0u8; 4];
    src.read_exact(&mut word)?;
    Ok(u32::from_le_bytes(word))
}

fn serialize_section<W: Write>(sink: &mut W, access: &RoadAccess) -> Result<(), CodecError> {
    let mut buckets: [Vec<Segment>; AccessType::COUNT] = std::array::from_fn(|_| Vec::new());

    for (&feature_id, &ty) in access.way_to_access() {
        buckets[ty as usize].push(Segment::new(FAKE_MWM_ID, feature_id, 0, true));
    }
    // Point ids ride as idx + 1; idx 0 stays reserved for the wildcard.
    for (&point, &ty) in access.point_to_access() {
        buckets[ty as usize].push(Segment::new(
            FAKE_MWM_ID,
            point.feature_id,
            point.point_id + 1,
            true,
        ));
    }

    for bucket in &mut buckets {
        bucket.sort_unstable();
        write_segments(sink, bucket)?;
    }
    Ok(())
}

fn deserialize_section<R: Read>(src: &mut R) -> Result<(WayToAccess, PointToAccess), CodecError> {
    let mut way_to_access = WayToAccess::default();
    let mut point_to_access = PointToAccess::default();

    for &ty in AccessType::all() {
        // An earlier revision could restrict any individual segment of a
        // feature. Only the wildcard and point encodings are produced today,
        // but arbitrary indices still decode, as point restrictions.
        for seg in read_segments(src)? {
            match RestrictionTarget::from(seg) {
                RestrictionTarget::Way(feature_id) => {
                    way_to_access.insert(feature_id, ty);
                }
                RestrictionTarget::Point(point) => {
                    point_to_access.insert(point, ty);
                }
            }
        }
    }
    Ok((way_to_access, point_to_access))
}

fn write_segments<W: Write>(sink: &mut W, segments: &[Segment]) -> Result<(), CodecError> {
    write_varuint(sink, segments.len() as u64)?;

    let mut bits = BitWriter::new(sink);
    let mut prev_fid = 0u32;
    for seg in segments {
        if seg.feature_id < prev_fid {
            return Err(CodecError::UnsortedFeatureIds {
                prev: prev_fid,
                next: seg.feature_id,
            });
        }
        write_gamma(&mut bits, u64::from(seg.feature_id - prev_fid) + 1)?;
        prev_fid = seg.feature_id;
    }
    for seg in segments {
        write_gamma(&mut bits, u64::from(seg.segment_idx) + 1)?;
    }
    for seg in segments {
        bits.write_bit(seg.forward)?;
    }
    bits.finish()?;
    Ok(())
}

fn read_segments<R: Read>(src: &mut R) -> Result<Vec<Segment>, CodecError> {
    let n = read_varuint(src)? as usize;
    // The count is untrusted input. Cap the pre-allocation so a corrupt blob
    // claiming billions of elements runs out of stream bytes and surfaces a
    // read error instead of aborting on an absurd allocation.
    let cap = n.min(1024);

    let mut bits = BitReader::new(src);
    let mut feature_ids = Vec::with_capacity(cap);
    let mut prev_fid = 0u32;
    for _ in 0..n {
        let delta = read_gamma(&mut bits)? - 1;
        prev_fid = u32::try_from(delta)
            .ok()
            .and_then(|d| prev_fid.checked_add(d))
            .ok_or_else(|| corrupt("feature id delta overflows u32"))?;
        feature_ids.push(prev_fid);
    }

    let mut segment_idxs = Vec::with_capacity(cap);
    for _ in 0..n {
        let idx = read_gamma(&mut bits)? - 1;
        segment_idxs.push(u32::try_from(idx).map_err(|_| corrupt("segment idx overflows u32"))?);
    }

    let mut segments = Vec::with_capacity(cap);
    for i in 0..n {
        let forward = bits.read_bit()?;
        segments.push(Segment::new(
            FAKE_MWM_ID,
            feature_ids[i],
            segment_idxs[i],
            forward,
        ));
    }

    // Drop the zero padding up to the byte boundary.
    bits.align_to_byte();
    Ok(segments)
}

fn corrupt(msg: &str) -> CodecError {
    CodecError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, msg))
}
