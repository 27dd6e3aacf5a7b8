//! Handle to a spawned port loop

use std::thread::JoinHandle;

use crossbeam::channel::{Receiver, Sender};

use crate::error::{BridgeError, Result};
use crate::port::{Request, Response};

/// Front-end side of a port loop started with `PortHost::spawn`
///
/// Dropping the handle closes the request channel and waits for the loop,
/// but discards the loop's result: a save failure is then only visible in
/// the loop's `error!` log. Call `shutdown` to receive it.
pub struct PortHandle {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    thread: Option<JoinHandle<Result<()>>>,
}

impl PortHandle {
    pub(super) fn new(
        requests: Sender<Request>,
        responses: Receiver<Response>,
        thread: JoinHandle<Result<()>>,
    ) -> Self {
        Self {
            requests: Some(requests),
            responses,
            thread: Some(thread),
        }
    }

    /// Send a request to the loop
    ///
    /// Fails with `PortClosed` once the loop has stopped.
    pub fn send(&self, request: Request) -> Result<()> {
        let sender = self
            .requests
            .as_ref()
            .ok_or_else(|| BridgeError::PortClosed("request port closed".to_string()))?;

        sender
            .send(request)
            .map_err(|_| BridgeError::PortClosed("port loop has stopped".to_string()))
    }

    /// Outbound `symbolsPort` messages
    pub fn responses(&self) -> &Receiver<Response> {
        &self.responses
    }

    /// Close the request channel and return the loop's result
    pub fn shutdown(mut self) -> Result<()> {
        self.requests.take();
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| BridgeError::PortClosed("port thread panicked".to_string()))?,
            None => Ok(()),
        }
    }
}

impl Drop for PortHandle {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
