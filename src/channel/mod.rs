// src/channel/mod.rs
//
// Named method channels between the shell and the usage collaborators.

mod dispatcher;
mod messages;

pub use dispatcher::RequestDispatcher;
pub use messages::{ChannelName, Method, MethodCall, MethodReply};
