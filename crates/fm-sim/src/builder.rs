//! Fluent builder for constructing a [`MigrationSim`].

use fm_core::SimConfig;
use fm_policy::DecisionPolicy;
use fm_topology::{MobileDevice, Topology};

use crate::{MigrationSim, MobilityModel, SimError, SimResult};

/// Fluent builder for [`MigrationSim<P, M>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, tick duration, seed
/// - [`Topology`] — APs and servers
/// - `P: DecisionPolicy` — usually from [`fm_policy::build_engine`]
/// - `M: MobilityModel` — e.g. [`LinearMobility`](crate::LinearMobility)
///
/// # Optional inputs
///
/// | Method          | Default     |
/// |-----------------|-------------|
/// | `.devices(v)`   | no devices  |
///
/// `build` counts every device's hosted workload towards its current
/// server's load, on top of any load already set on the topology.
pub struct MigrationSimBuilder<P: DecisionPolicy, M: MobilityModel> {
    config:   SimConfig,
    topology: Topology,
    devices:  Vec<MobileDevice>,
    policy:   P,
    mobility: M,
}

impl<P: DecisionPolicy, M: MobilityModel> MigrationSimBuilder<P, M> {
    pub fn new(config: SimConfig, topology: Topology, policy: P, mobility: M) -> Self {
        Self { config, topology, devices: Vec::new(), policy, mobility }
    }

    /// Supply the device roster.  `devices[i].id` must equal `DeviceId(i)`.
    pub fn devices(mut self, devices: Vec<MobileDevice>) -> Self {
        self.devices = devices;
        self
    }

    /// Validate inputs and return a ready-to-run [`MigrationSim`].
    pub fn build(self) -> SimResult<MigrationSim<P, M>> {
        if self.config.tick_duration_ms == 0 {
            return Err(SimError::Config("tick_duration_ms must be positive".to_owned()));
        }

        let mut topology = self.topology;
        for (i, device) in self.devices.iter().enumerate() {
            if device.id.index() != i {
                return Err(SimError::DeviceIdMismatch { position: i, id: device.id.0 });
            }
            topology.validate_device(device)?;
        }
        for server in self.devices.iter().filter_map(|d| d.current_server) {
            if let Some(s) = topology.server_mut(server) {
                s.load += 1;
            }
        }

        Ok(MigrationSim {
            clock:    self.config.make_clock(),
            config:   self.config,
            topology,
            devices:  self.devices,
            policy:   self.policy,
            mobility: self.mobility,
        })
    }
}
