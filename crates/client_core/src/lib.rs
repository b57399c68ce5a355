//! Client side of the hexapod touch control: maps touches on the circular
//! pad to motion commands and forwards them, in order, over a TCP link.

pub mod control_pad;
pub mod dispatcher;
pub mod error;
pub mod mapper;
pub mod transport;

pub use control_pad::ControlPad;
pub use dispatcher::{CommandDispatcher, DispatcherStats, DEFAULT_QUEUE_CAPACITY};
pub use error::{DispatchError, TransportError};
pub use mapper::{map_touch, map_touch_in};
pub use transport::{TcpTransport, Transport, TransportEvent};

#[cfg(test)]
pub(crate) mod test_support;
