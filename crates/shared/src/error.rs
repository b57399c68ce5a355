use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown command payload: {0:?}")]
    UnknownCommand(String),
    #[error("empty command frame")]
    EmptyFrame,
}
