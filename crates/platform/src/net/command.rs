pub const CMD_SEND: i16 = 1;
pub const CMD_GET: i16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetCommand {
    Send,
    Get,
}

impl NetCommand {
    pub fn raw(self) -> i16 {
        match self {
            NetCommand::Send => CMD_SEND,
            NetCommand::Get => CMD_GET,
        }
    }
}

impl TryFrom<i16> for NetCommand {
    type Error = CommandError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            CMD_SEND => Ok(NetCommand::Send),
            CMD_GET => Ok(NetCommand::Get),
            other => Err(CommandError::Invalid(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("bad net cmd: {0}")]
    Invalid(i16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(NetCommand::try_from(CMD_SEND), Ok(NetCommand::Send));
        assert_eq!(NetCommand::try_from(CMD_GET), Ok(NetCommand::Get));
        assert_eq!(NetCommand::try_from(0), Err(CommandError::Invalid(0)));
        assert_eq!(NetCommand::Get.raw(), 2);
    }
}
