//! Language client that launches and supervises an external Ekam language server.
#![deny(missing_docs)]
//!
//! The crate owns the client side of a language server session: it spawns the
//! configured executable, speaks the JSON-RPC lifecycle handshake over a
//! header-framed stdio channel, forwards watched-file notifications when the
//! session asks for them, and hands the caller a disposable [`ClientHandle`].
//! Starting a session never blocks on process readiness; spawn and handshake
//! run on a background worker and any failure is reported through logging
//! rather than to the caller.

mod client;
mod connection;
mod error;
mod executable;
mod handle;
mod jsonrpc;
mod selector;
mod session;
mod transport;

pub use client::LanguageClient;
pub use error::{ClientError, TransportError};
pub use executable::ExecutableSpec;
pub use handle::{ClientHandle, ClientPhase};
pub use selector::{DocumentFilter, DocumentSelector};
pub use session::SessionDescriptor;
pub use transport::{FramedTransport, StdioTransport};
