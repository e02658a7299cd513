//! `fm-policy` — should this device's workload migrate, and where to?
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`engine`]  | `DecisionPolicy` trait, `MigrationEngine` orchestrator          |
//! | [`gate`]    | `MigrationGate` trait and the four variant gates                |
//! | [`kind`]    | `PolicyKind`, `build_engine`                                    |
//! | [`record`]  | `DecisionRecord`, `DecisionRecorder`, `NoopRecorder`, `MemoryRecorder` |
//! | [`reason`]  | `DecisionReason`                                                |
//! | [`context`] | `DecisionContext<'a>` — clock and topology for one tick         |
//! | [`config`]  | `MigrationConfig`                                               |
//! | [`error`]   | `PolicyError`, `PolicyResult<T>`                                |
//!
//! # Pipeline
//!
//! Every variant runs the same steps inside [`MigrationEngine`]:
//!
//! 1. Resolve the source AP, classify the device's position, refresh the
//!    zone/point flags.
//! 2. Ask the gate.  A rejection ends the evaluation.
//! 3. Find the next AP (`NoNextAp`), check it changes the hosting server
//!    (`NotEdgeAp`), pick the destination server the gate asks for
//!    (`NoApServer`, `NoEligibleServer`, `SameServer`).
//! 4. Run admission control once (`ServiceAgreementDeclined`).
//! 5. Write the destination fields and report `Approved`.
//!
//! Each call emits exactly one [`DecisionRecord`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on records and configuration. |

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod gate;
pub mod kind;
pub mod reason;
pub mod record;


pub use config::MigrationConfig;
pub use context::DecisionContext;
pub use engine::{DecisionPolicy, MigrationEngine};
pub use error::{PolicyError, PolicyResult};
pub use gate::{
    GateDecision, LowestLatencyGate, MigrationGate, NearestApGate, NearestServerGate, Probe,
    RemoteGate, ServerChoice,
};
pub use kind::{DynEngine, PolicyKind, build_engine};
pub use reason::DecisionReason;
pub use record::{DecisionRecord, DecisionRecorder, MemoryRecorder, NoopRecorder};
