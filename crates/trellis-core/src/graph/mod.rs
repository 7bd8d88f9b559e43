//! The graph store and its entities.
//!
//! [`GraphStore`] owns the live node and edge collections and applies the
//! schema validator's rules on every mutation. Change notifications ride a
//! broadcast channel (see [`events`]); derived soft links are written back
//! by the similarity linker in `trellis-enrichment`.

pub mod events;
pub mod node;
pub mod store;
mod validation;

pub use events::{EdgeUpdate, GraphEvent, NodeUpdate, EVENT_CHANNEL_CAPACITY};
pub use node::{Edge, Node, SoftLink, SoftLinkReason};
pub use store::GraphStore;
