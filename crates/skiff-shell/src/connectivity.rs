// SPDX-License-Identifier: Apache-2.0
//
// Edge-triggered connectivity monitoring.
//
// The reachability feed can repeat states (the OS re-evaluates paths on
// interface churn), so the banner must fire on the online-to-offline
// transition only, never on repeated offline updates. Load-failure fallback
// is a separate signal handled elsewhere and deliberately not unified with
// this monitor.

use skiff_core::types::ConnectivityState;
use tracing::info;

/// Tracks the last observed reachability state.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    online: bool,
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityMonitor {
    /// The shell assumes it starts online; the first update corrects it.
    pub fn new() -> Self {
        Self { online: true }
    }

    /// Record one reachability update. Returns `true` exactly when the
    /// offline advisory should be raised (online-to-offline edge).
    pub fn observe(&mut self, state: ConnectivityState) -> bool {
        let went_offline = self.online && !state.is_online;
        if went_offline {
            info!("connectivity lost");
        } else if !self.online && state.is_online {
            info!("connectivity restored");
        }
        self.online = state.is_online;
        went_offline
    }

    pub fn is_online(&self) -> bool {
        self.online
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_edge_raises_once() {
        let mut monitor = ConnectivityMonitor::new();
        assert!(monitor.observe(ConnectivityState::offline()));
        assert!(!monitor.observe(ConnectivityState::offline()));
        assert!(!monitor.observe(ConnectivityState::offline()));
    }

    #[test]
    fn each_new_offline_edge_raises_again() {
        let mut monitor = ConnectivityMonitor::new();
        assert!(monitor.observe(ConnectivityState::offline()));
        assert!(!monitor.observe(ConnectivityState::online()));
        assert!(monitor.observe(ConnectivityState::offline()));
    }

    #[test]
    fn staying_online_raises_nothing() {
        let mut monitor = ConnectivityMonitor::new();
        assert!(!monitor.observe(ConnectivityState::online()));
        assert!(!monitor.observe(ConnectivityState::online()));
        assert!(monitor.is_online());
    }
}
