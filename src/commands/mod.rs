// src/commands/mod.rs
//
// Tauri IPC entry point for the method channels.

use crate::channel::{MethodCall, MethodReply, RequestDispatcher};
use crate::error::ChannelError;
use std::sync::Arc;
use tauri::State;

/// Handle one method call on `channel`. Runs to completion on the calling thread.
#[tauri::command]
#[allow(clippy::needless_pass_by_value, reason = "Tauri deserializes command arguments by value")]
pub fn invoke_channel(
    dispatcher: State<'_, Arc<RequestDispatcher>>,
    channel: String,
    call: MethodCall,
) -> Result<MethodReply, ChannelError> {
    dispatcher.dispatch(&channel, &call)
}
