//! # SymbolBridge
//!
//! Persists a front-end application's symbol list in a key-value store:
//! - `loadSymbols` reads the saved JSON array and answers on `symbolsPort`
//! - `saveSymbols` replaces the saved array (fire-and-forget)
//! - Load failures are logged and produce no answer
//! - Save failures propagate to the host
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Front-end application                       │
//! │        loadSymbols / saveSymbols  →   ← symbolsPort          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     PortHost                                 │
//! │         (channels or line-delimited JSON stream)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  StorageBridge                               │
//! │          (one fixed key, whole-record replace)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ MemoryStore │          │  FileStore  │
//!   │  (RwLock)   │          │ (CRC record)│
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod symbols;
pub mod store;
pub mod port;
pub mod bridge;
pub mod host;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BridgeError, Result};
pub use config::Config;
pub use bridge::{LoadError, StorageBridge};
pub use symbols::SymbolList;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SymbolBridge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
