use super::config::NetConfig;

#[derive(Debug, Clone, Default)]
pub struct TransportStats {
    pub sends: u64,
    pub receives: u64,
}

/// Send/receive capability selected once at startup.
pub trait Transport {
    fn name(&self) -> &'static str;

    fn send(&mut self, config: &mut NetConfig);

    fn receive(&mut self, config: &mut NetConfig);

    fn stats(&self) -> &TransportStats;
}

/// Single-node transport. There is no peer, so nothing is ever sent or
/// received.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    stats: TransportStats,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for LoopbackTransport {
    fn name(&self) -> &'static str {
        "loopback"
    }

    fn send(&mut self, _config: &mut NetConfig) {
        self.stats.sends += 1;
    }

    fn receive(&mut self, config: &mut NetConfig) {
        self.stats.receives += 1;
        config.remote_node = -1;
        config.data_length = 0;
    }

    fn stats(&self) -> &TransportStats {
        &self.stats
    }
}
