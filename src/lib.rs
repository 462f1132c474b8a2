//! Typed views over a QuickJS-hosted document/event object graph.
//!
//! The runtime owns every underlying object; this crate only wraps them.
//! [`EventRegistry`] classifies incoming event values against registered
//! categories and produces wrappers satisfying the [`DomEvent`] contract,
//! with [`MouseEvent`] as the built-in specialized category.

pub mod engine;
pub mod event;
pub mod node;

pub use engine::QuickJsEngine;
pub use event::mouse::{CoordinateSpace, MouseButton, MouseEvent};
pub use event::{BaseEvent, DomEvent, EventConstructor, EventRegistry};
pub use node::{Element, NodeList};
