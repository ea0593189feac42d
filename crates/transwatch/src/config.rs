//! Configuration for transformation wrappers

/// Default capacity of a wrapper's output channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1;

/// Configuration for [`wrap_list_watch_with_config`](crate::wrap_list_watch_with_config)
/// and [`TransformingWatch::with_config`](crate::TransformingWatch::with_config)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapConfig {
    /// Capacity of the output channel of each wrapped watch stream
    ///
    /// Kept small so a slow consumer stalls the forwarding task, and the
    /// forwarding task in turn stalls the inner stream.
    pub channel_capacity: usize,

    /// Label attached to tracing output of the wrapper
    pub name: String,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            name: "transform".to_string(),
        }
    }
}

impl WrapConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output channel capacity
    ///
    /// A capacity of zero is raised to one, the smallest bounded channel available.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Set the tracing label
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
