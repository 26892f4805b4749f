//! An implementation of UUID version 1 with a clock sequence that survives process restarts
//!
//! ```rust
//! use uuid1::{FileStore, Generator, NodeFallback};
//!
//! # let dir = tempfile::tempdir()?;
//! # let path = dir.path().join("uuid_state.json");
//! let g = Generator::builder(FileStore::new(path))
//!     .node_fallback(NodeFallback::Random)
//!     .build()?;
//! let uuid = g.generate()?;
//! println!("{}", uuid); // e.g. "d2b45678-a3c1-11ee-aa5b-001a2b3c4d5e"
//! println!("{:x}", uuid); // e.g. "d2b45678a3c111eeaa5b001a2b3c4d5e"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_hi         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp counts 100-nanosecond intervals since 1582-10-15T00:00:00Z. Its low 32
//!   bits go to `time_low`, the next 16 bits to `time_mid`, and the top 12 bits to `time_hi`.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field is randomly initialized when a generator first creates its
//!   state and is incremented whenever the timestamp does not advance past that of the preceding
//!   UUID, whether because several UUIDs fall in the same 100-nanosecond tick or because the
//!   system clock was set backward. It wraps around from 16383 to 0.
//! - The 48-bit `node` field holds the hardware address of the first network interface that is
//!   up and is not a loopback interface.
//!
//! # Persisted state
//!
//! A [`Generator`] keeps the clock sequence, the last timestamp, and the node identifier in a
//! [`StateStore`] and saves them after every UUID, so that a restarted process picks up where
//! the previous one left off instead of drawing a new clock sequence. [`FileStore`] is the
//! file-based implementation and [`MemoryStore`] keeps the state within the process.
//!
//! The node identifier is resolved only once, when no prior state exists, and is persisted with
//! the rest of the state. Use [`Builder::node_fallback`] to accept a random node identifier on
//! hosts without a usable network interface.

mod id;
pub use id::{ParseError, Uuid, Variant};

mod state;
pub use state::{ClockSeq, GeneratorState, Timestamp};

mod node;
pub use node::{InterfaceNode, NodeId, NodeSource, StaticNode};

mod store;
pub use store::{FileStore, MemoryStore, StateStore};

mod error;
pub use error::{Error, PersistError, StoreError};

pub mod generator;
#[doc(inline)]
pub use generator::{Builder, Generator, NodeFallback, RandSource, StdSystemTime, TimeSource};
