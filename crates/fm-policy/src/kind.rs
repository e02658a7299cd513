//! Policy variants by name, and the factory that assembles them.

use std::fmt;
use std::str::FromStr;

use fm_inference::HttpAdvisor;
use fm_select::{CapacityAgreement, DistanceLoadCost};

use crate::gate::{LowestLatencyGate, NearestApGate, NearestServerGate, RemoteGate};
use crate::{MigrationConfig, MigrationEngine, MigrationGate, PolicyError, PolicyResult};

/// The four decision variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PolicyKind {
    /// A remote inference service decides; lowest-latency destination.
    RemoteDelegated,
    /// Zone and point; destination is the server beside the next AP.
    NearestAp,
    /// Moving, zone and point; lowest-latency destination.
    LowestLatency,
    /// Zone and point; nearest server other than the current one.
    NearestServer,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::RemoteDelegated,
        PolicyKind::NearestAp,
        PolicyKind::LowestLatency,
        PolicyKind::NearestServer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::RemoteDelegated => "remote-delegated",
            PolicyKind::NearestAp       => "nearest-ap",
            PolicyKind::LowestLatency   => "lowest-latency",
            PolicyKind::NearestServer   => "nearest-server",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyError;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| PolicyError::UnknownPolicy(s.to_owned()))
    }
}

/// An engine whose variant is chosen at run time.
pub type DynEngine = MigrationEngine<Box<dyn MigrationGate>, CapacityAgreement, DistanceLoadCost>;

/// Assemble the engine for `kind` with the default admission control and
/// cost model.
///
/// # Errors
///
/// `RemoteDelegated` builds an [`HttpAdvisor`] from `config.inference` and
/// fails if the HTTP client cannot be constructed.
pub fn build_engine(kind: PolicyKind, config: &MigrationConfig) -> PolicyResult<DynEngine> {
    let gate: Box<dyn MigrationGate> = match kind {
        PolicyKind::RemoteDelegated => Box::new(RemoteGate::new(HttpAdvisor::new(&config.inference)?)),
        PolicyKind::NearestAp       => Box::new(NearestApGate),
        PolicyKind::LowestLatency   => Box::new(LowestLatencyGate),
        PolicyKind::NearestServer   => Box::new(NearestServerGate),
    };
    Ok(MigrationEngine::new(gate, CapacityAgreement, config.cost.clone(), config.clone()))
}
