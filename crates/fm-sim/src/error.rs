use fm_topology::TopologyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("device at position {position} carries id {id}")]
    DeviceIdMismatch { position: usize, id: u32 },

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

pub type SimResult<T> = Result<T, SimError>;
