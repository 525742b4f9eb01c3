//! Schema-agnostic document tree and the key search over it.

mod node;
mod search;

pub use node::{Attribute, GenericNode};
pub use search::{find_key, get_text, Entry, Scope, Value};

pub(crate) use node::lookup_attribute;
