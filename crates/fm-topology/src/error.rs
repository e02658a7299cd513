//! Topology validation errors.
//!
//! Everything here is raised at construction time.  A topology (or device)
//! that passed validation never produces these during a tick.

use thiserror::Error;

use fm_core::{ApId, CoreError, DeviceId, ServerId};

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("{kind} at roster position {position} carries id {id}")]
    IdMismatch { kind: &'static str, position: usize, id: u32 },

    #[error("AP {ap} references unknown server {server}")]
    DanglingServer { ap: ApId, server: ServerId },

    #[error("AP {ap} lists unknown neighbour {neighbor}")]
    DanglingNeighbor { ap: ApId, neighbor: ApId },

    #[error("AP {0} lists itself as a neighbour")]
    SelfNeighbor(ApId),

    #[error("duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{what} of {name:?} must be positive and finite, got {value}")]
    InvalidGeometry { what: &'static str, name: String, value: f64 },

    #[error("unknown AP {0}")]
    UnknownAp(ApId),

    #[error("unknown server {0}")]
    UnknownServer(ServerId),

    #[error("device {device} is invalid: {reason}")]
    InvalidDevice { device: DeviceId, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
