//! Application state for the Compensation Engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

use super::proxy::UpstreamProxy;

/// Shared application state.
///
/// Holds the statutory amounts every handler reads and, when an upstream
/// calculation service is configured, the proxy that forwards to it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded statutory amounts.
    config: Arc<ConfigLoader>,
    /// Proxy to the upstream calculation service, if configured.
    proxy: Option<UpstreamProxy>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            proxy: None,
        }
    }

    /// Creates a state sharing an already-wrapped configuration loader.
    pub fn from_shared(config: Arc<ConfigLoader>) -> Self {
        Self {
            config,
            proxy: None,
        }
    }

    /// Attaches an upstream proxy.
    pub fn with_proxy(mut self, proxy: UpstreamProxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the upstream proxy, if one is configured.
    pub fn proxy(&self) -> Option<&UpstreamProxy> {
        self.proxy.as_ref()
    }
}
