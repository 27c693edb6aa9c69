mod caller;
mod transport;

pub(crate) use caller::{BlockingCaller, ErrorCaller, FixedResponseCaller};
pub(crate) use transport::{ImmediateTransport, ManualTask, ManualTransport};
