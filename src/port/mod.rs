//! Port Module
//!
//! Defines the messages exchanged with the front-end application.
//!
//! ## Ports
//! - `loadSymbols` (inbound): no payload
//! - `saveSymbols` (inbound): payload is the symbol list
//! - `symbolsPort` (outbound): payload is the loaded symbol list
//!
//! ## Wire Format (line-delimited JSON)
//! ```text
//! {"port":"loadSymbols"}
//! {"port":"saveSymbols","payload":["AAPL","MSFT"]}
//! {"port":"symbolsPort","payload":["AAPL","MSFT"]}
//! ```

mod codec;
mod message;

pub use codec::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, MAX_LINE_SIZE,
};
pub use message::{Request, Response};
