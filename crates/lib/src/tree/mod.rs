//! Dynamic, schema-less document trees.
//!
//! A [`Document`] owns one tree of nodes. Every node holds exactly one payload:
//! a Group (string-keyed children), an Array (ordered children) or a scalar
//! [`Value`](Kind::Value) leaf. Nodes are addressed by dotted paths relative to
//! any node, with bracketed segments selecting array elements:
//!
//! ```
//! use arbor::{array, group, tree::Document};
//!
//! let mut doc = Document::new(group! {
//!     "server" => group! { "hosts" => array!["alpha", "beta"] },
//! });
//!
//! assert_eq!(doc.get("server.hosts.[1]").unwrap().as_str().unwrap(), "beta");
//!
//! doc.set("server.port", 8080).unwrap();
//! assert!(doc.has("server.port"));
//! assert!(doc.remove("server.hosts"));
//! ```
//!
//! Writes create missing Group levels on the way down, but never Arrays. Every
//! node keeps a link to its structural parent, so a change anywhere in the
//! tree is reported to each [`ChangeHook`] registered on the path to the root.
//!
//! Nodes live in an arena inside the document and are identified by [`NodeId`].
//! [`Node`] and [`NodeMut`] are borrowed handles that pair a document with an id.

mod array;
mod coerce;
mod document;
mod errors;
mod group;
mod link;
mod navigate;
mod node;
pub mod path;
mod staticize;
mod value;


pub use document::{Document, NodeId};
pub use errors::TreeError;
pub use link::ChangeHook;
pub use node::{Node, NodeMut};
pub use staticize::{LIST_KEY, VALUE_KEY};
pub use value::{Kind, Map, Scalar, Value};
