use super::command::NetCommand;
use super::config::NetConfig;
use super::transport::{LoopbackTransport, Transport};

/// Routes the command register of a [`NetConfig`] to the transport chosen at
/// startup.
pub struct CommandDispatcher {
    transport: Box<dyn Transport>,
}

impl CommandDispatcher {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        log::debug!("Network transport: {}", transport.name());
        Self { transport }
    }

    /// Resets `config` to the single-node layout and selects the loopback
    /// transport.
    pub fn init_single_node(config: &mut NetConfig) -> Self {
        *config = NetConfig::single_node();
        Self::new(Box::new(LoopbackTransport::new()))
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Executes the command currently in `config.command`.
    ///
    /// # Panics
    ///
    /// An unrecognised command means the calling engine is broken; this
    /// aborts rather than returning.
    pub fn dispatch(&mut self, config: &mut NetConfig) -> NetCommand {
        let command = match config.pending_command() {
            Ok(command) => command,
            Err(e) => {
                log::error!("{}", e);
                panic!("{}", e);
            }
        };

        match command {
            NetCommand::Send => self.transport.send(config),
            NetCommand::Get => self.transport.receive(config),
        }
        command
    }

    /// Writes `command` into the register and dispatches it.
    pub fn dispatch_command(&mut self, command: i16, config: &mut NetConfig) -> NetCommand {
        config.command = command;
        self.dispatch(config)
    }
}
