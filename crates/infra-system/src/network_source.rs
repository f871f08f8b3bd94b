// Network metric source backed by sysinfo

use async_trait::async_trait;
use std::sync::Mutex;
use sysinfo::Networks;
use tracing::debug;

use hostpulse_core::port::{MetricSource, SourceError};

/// Samples cumulative received/transmitted byte counters.
///
/// Bound to one interface by name, or to the aggregate of all
/// interfaces when `None`. A named interface that is absent this
/// cycle is a per-cycle `Unavailable` so the owning producer can
/// apply its failure policy.
pub struct NetworkSource {
    interface: Option<String>,
    networks: Mutex<Networks>,
}

impl NetworkSource {
    pub fn new(interface: Option<String>) -> Self {
        Self {
            interface,
            networks: Mutex::new(Networks::new_with_refreshed_list()),
        }
    }
}

#[async_trait]
impl MetricSource for NetworkSource {
    fn name(&self) -> &str {
        "network"
    }

    async fn sample(&self) -> Result<String, SourceError> {
        let mut networks = self.networks.lock().unwrap();
        networks.refresh_list();

        let (rx_bytes, tx_bytes) = match &self.interface {
            Some(name) => {
                let data = networks
                    .iter()
                    .find(|(iface, _)| iface.as_str() == name)
                    .map(|(_, data)| data)
                    .ok_or_else(|| {
                        SourceError::Unavailable(format!("no network interface {}", name))
                    })?;
                (data.total_received(), data.total_transmitted())
            }
            None => networks.iter().fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (rx + data.total_received(), tx + data.total_transmitted())
            }),
        };

        debug!(rx_bytes = %rx_bytes, tx_bytes = %tx_bytes, "Network sampled");
        Ok(format!("rx {} bytes, tx {} bytes", rx_bytes, tx_bytes))
    }
}
