//! Why a decision came out the way it did.

use std::fmt;

/// Outcome reason attached to every [`DecisionRecord`](crate::DecisionRecord).
///
/// The `Display` strings are stable and end up in output files.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionReason {
    Approved,
    Stationary,
    OutsideZoneOrPoint,
    InferenceRejected,
    InferenceFailure,
    NoNextAp,
    NotEdgeAp,
    NoApServer,
    NoEligibleServer,
    SameServer,
    ServiceAgreementDeclined,
    SourceApMissing,
}

impl DecisionReason {
    #[inline]
    pub fn is_approved(self) -> bool {
        self == DecisionReason::Approved
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecisionReason::Approved                 => "approved",
            DecisionReason::Stationary               => "stationary",
            DecisionReason::OutsideZoneOrPoint       => "outside migration zone or point",
            DecisionReason::InferenceRejected        => "migration rejected by inference API",
            DecisionReason::InferenceFailure         => "inference API failure",
            DecisionReason::NoNextAp                 => "no next AP",
            DecisionReason::NotEdgeAp                => "next AP is not an edge AP",
            DecisionReason::NoApServer               => "next AP has no co-located server",
            DecisionReason::NoEligibleServer         => "no eligible server",
            DecisionReason::SameServer               => "candidate server is the current server",
            DecisionReason::ServiceAgreementDeclined => "service agreement declined",
            DecisionReason::SourceApMissing          => "source AP missing",
        }
    }
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
