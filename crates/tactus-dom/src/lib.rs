//! tactus DOM - Host surface model
//!
//! A small, single-threaded stand-in for the browser surface that gesture
//! recognizers and accessibility helpers bind to:
//! - Arena-based element tree with attributes, classes and inline style
//! - Touch and keyboard events with per-node listeners
//! - Virtual clock and timer queue (deterministic `setTimeout`)
//! - Navigator capabilities (vibration, touch points, viewport)
//! - Multi-touch simulator for driving contact sequences

mod events;
mod host;
mod navigator;
mod node;
mod timers;
mod touch;
mod tree;

pub use events::{Event, EventType, Listener, ListenerId, ListenerOptions, Touch};
pub use host::{Host, WeakHost};
pub use navigator::{DeviceProfile, Navigator, VibrationController};
pub use node::{ElementData, InlineStyle, Node, NodeData, Rect};
pub use timers::{TimerId, TimerQueue};
pub use touch::TouchSimulator;
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Raw arena index
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child} under {parent}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}
