//! Byte-level externalisation hooks for persistence and replication.
//!
//! Barriers are written as two consecutive points with no count prefix; the
//! endpoint order is significant because it defines the normal. Bodies are
//! replicated as their position followed by an optional health payload.

use crate::barrier::Barrier;
use crate::barrier_set::BarrierSet;
use crate::body::{Body, BodyId, Health};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Encoded size of one barrier: two `Vec2` of two little-endian `f32`.
pub const BARRIER_BYTES: usize = 16;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("barrier stream of {len} bytes is not a multiple of {}", BARRIER_BYTES)]
    TruncatedBarriers { len: usize },
    #[error("malformed payload: {0}")]
    Malformed(#[from] bincode::Error),
}

pub fn encode_barriers(barriers: &BarrierSet) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::with_capacity(barriers.len() * BARRIER_BYTES);

    for bar in barriers {
        bincode::serialize_into(&mut bytes, bar)?;
    }

    Ok(bytes)
}

/// Decode a barrier stream and rebuild adjacency.
pub fn decode_barriers(bytes: &[u8]) -> Result<BarrierSet, CodecError> {
    if bytes.len() % BARRIER_BYTES != 0 {
        return Err(CodecError::TruncatedBarriers { len: bytes.len() });
    }

    let mut set = BarrierSet::new();

    for chunk in bytes.chunks_exact(BARRIER_BYTES) {
        let bar: Barrier = bincode::deserialize(chunk)?;
        set.add_segment(bar.p1, bar.p2);
    }

    set.rebuild_adjacency();
    Ok(set)
}

/// Replicated state of one body. The id addresses the body and travels
/// outside the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: Vec2,
    pub health: Option<Health>,
}

impl BodySnapshot {
    pub fn of(body: &Body) -> Self {
        Self {
            id: body.id,
            position: body.position,
            health: body.health,
        }
    }

    /// Observer-side mirror: the old position becomes the previous one so the
    /// body keeps an implied velocity between updates.
    pub fn apply_to(&self, body: &mut Body) {
        body.previous_position = body.position;
        body.position = self.position;
        body.tentative_next_position = self.position;
        body.position_adjustment = Vec2::ZERO;

        if self.health.is_some() {
            body.health = self.health;
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SnapshotPayload {
    position: Vec2,
    health: Option<Health>,
}

pub fn encode_snapshot(snapshot: &BodySnapshot) -> Result<Vec<u8>, CodecError> {
    let payload = SnapshotPayload {
        position: snapshot.position,
        health: snapshot.health,
    };

    Ok(bincode::serialize(&payload)?)
}

pub fn decode_snapshot(id: BodyId, bytes: &[u8]) -> Result<BodySnapshot, CodecError> {
    let payload: SnapshotPayload = bincode::deserialize(bytes)?;

    Ok(BodySnapshot {
        id,
        position: payload.position,
        health: payload.health,
    })
}
