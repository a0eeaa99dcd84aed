//! Channel-driven update loop
//!
//! Location and motion providers run at their own uncoordinated rates and
//! may live on different threads. They all push [`SensorUpdate`]s into one
//! bounded channel; a single consumer thread owns the
//! [`CallbackNavigationApi`] and performs mutate + recompute + notify as one
//! step per message, so no state is ever read half-updated.

use crate::api::callback::CallbackNavigationApi;
use crate::api::types::{ApiError, ApiResult, NavigationSnapshot};
use crate::hardware::SensorUpdate;
use async_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Cloneable producer handle for sensor threads
#[derive(Debug, Clone)]
pub struct UpdateSender {
    tx: Sender<SensorUpdate>,
}

impl UpdateSender {
    /// Queue an update, blocking while the channel is full
    pub fn send(&self, update: SensorUpdate) -> ApiResult<()> {
        self.tx.send_blocking(update).map_err(|_| ApiError::ChannelClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Running update loop; owns the consumer thread
pub struct UpdateLoop {
    sender: UpdateSender,
    handle: Option<JoinHandle<CallbackNavigationApi>>,
}

impl UpdateLoop {
    /// Start the consumer thread with a channel of `capacity` slots
    pub fn spawn(api: CallbackNavigationApi, capacity: usize) -> ApiResult<Self> {
        let (tx, rx) = async_channel::bounded(capacity.max(1));

        let handle = thread::Builder::new()
            .name("compass-updates".to_string())
            .spawn(move || run_consumer(api, rx))?;

        log::info!("Update loop started (capacity {})", capacity.max(1));

        Ok(Self {
            sender: UpdateSender { tx },
            handle: Some(handle),
        })
    }

    pub fn sender(&self) -> UpdateSender {
        self.sender.clone()
    }

    /// Close the channel, let the consumer drain what is queued, and hand
    /// back the API with its final state
    pub fn shutdown(mut self) -> ApiResult<CallbackNavigationApi> {
        self.sender.tx.close();
        let handle = self.handle.take().ok_or(ApiError::LoopPanicked)?;
        handle.join().map_err(|_| ApiError::LoopPanicked)
    }
}

impl Drop for UpdateLoop {
    fn drop(&mut self) {
        self.sender.tx.close();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Update loop thread panicked");
            }
        }
    }
}

fn run_consumer(mut api: CallbackNavigationApi, rx: Receiver<SensorUpdate>) -> CallbackNavigationApi {
    let mut last: Option<NavigationSnapshot> = None;

    // recv_blocking keeps yielding queued items after close, then errors
    while let Ok(update) = rx.recv_blocking() {
        log::trace!("Processing {} update", update.kind());
        last = Some(api.process_update(update));
    }

    if let Some(snapshot) = last {
        log::info!("Update loop stopped after {} recomputes", snapshot.sequence_number);
    } else {
        log::info!("Update loop stopped without updates");
    }
    api
}
