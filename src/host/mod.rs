//! Host Module
//!
//! Pumps port requests through a bridge, one at a time.
//!
//! ## Transports
//! - Channels: `PortHost::run` over crossbeam channels, or `PortHost::spawn`
//!   to run that loop on a dedicated thread
//! - Streams: `PortHost::serve` over any `BufRead`/`Write` pair using the
//!   line-delimited JSON wire form (the CLI uses stdin/stdout)
//!
//! ## Failure handling
//! - A failed save stops the loop and is returned to the caller
//! - A malformed inbound line is logged and skipped (`serve` only)
//! - Loads never fail

mod handle;

use std::io::{BufRead, Write};
use std::thread;

use crossbeam::channel::{self, Receiver, Sender};

use crate::bridge::StorageBridge;
use crate::error::{BridgeError, Result};
use crate::port::{read_request, write_response, Request, Response};
use crate::store::KeyValueStore;

pub use handle::PortHandle;

/// Runs the request loop for one bridge
pub struct PortHost<S> {
    bridge: StorageBridge<S>,
}

impl<S: KeyValueStore> PortHost<S> {
    /// Create a host around `bridge`
    pub fn new(bridge: StorageBridge<S>) -> Self {
        Self { bridge }
    }

    /// Get the wrapped bridge
    pub fn bridge(&self) -> &StorageBridge<S> {
        &self.bridge
    }

    /// Handle a single request to completion
    pub fn handle(&self, request: Request) -> Result<Option<Response>> {
        tracing::debug!("Received {} request", request.port_name());
        self.bridge.dispatch(request)
    }

    /// Process requests until the request channel disconnects
    pub fn run(&self, requests: &Receiver<Request>, responses: &Sender<Response>) -> Result<()> {
        for request in requests.iter() {
            if let Some(response) = self.handle(request)? {
                let port = response.port_name();
                responses.send(response).map_err(|_| {
                    BridgeError::PortClosed(format!("{} receiver dropped", port))
                })?;
            }
        }

        tracing::debug!("Request channel closed, stopping port loop");
        Ok(())
    }

    /// Process line-delimited requests from `reader` until end of stream
    ///
    /// Responses are written to `writer`, one line each.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        loop {
            let request = match read_request(&mut reader) {
                Ok(Some(request)) => request,
                Ok(None) => break,
                Err(BridgeError::Protocol(msg)) => {
                    tracing::warn!("Skipping inbound message: {}", msg);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Some(response) = self.handle(request)? {
                write_response(&mut writer, &response)?;
            }
        }

        tracing::debug!("Input stream closed, stopping port loop");
        Ok(())
    }
}

impl<S: KeyValueStore + 'static> PortHost<S> {
    /// Run the channel loop on its own thread
    ///
    /// Both channels are unbounded; requests are still handled one at a time.
    pub fn spawn(self) -> Result<PortHandle> {
        let (request_tx, request_rx) = channel::unbounded();
        let (response_tx, response_rx) = channel::unbounded();

        let thread = thread::Builder::new()
            .name("symbolbridge-port".to_string())
            .spawn(move || {
                let result = self.run(&request_rx, &response_tx);
                if let Err(e) = &result {
                    tracing::error!("Port loop stopped: {}", e);
                }
                result
            })?;

        Ok(PortHandle::new(request_tx, response_rx, thread))
    }
}
