//! Admission control: may a server take on one more workload?

use fm_topology::{MobileDevice, Server};

/// The last check before a migration is approved.
///
/// Called at most once per evaluation; callers reuse the answer.
pub trait AdmissionControl: Send + Sync + 'static {
    fn service_agreement(&self, server: &Server, device: &MobileDevice) -> bool;
}

impl<T: AdmissionControl + ?Sized> AdmissionControl for Box<T> {
    fn service_agreement(&self, server: &Server, device: &MobileDevice) -> bool {
        (**self).service_agreement(server, device)
    }
}

/// Accept while the server is accepting and has a free slot.
#[derive(Copy, Clone, Debug, Default)]
pub struct CapacityAgreement;

impl AdmissionControl for CapacityAgreement {
    fn service_agreement(&self, server: &Server, _device: &MobileDevice) -> bool {
        server.accepting && server.has_headroom()
    }
}
