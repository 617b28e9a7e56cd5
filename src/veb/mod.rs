//! van Emde Boas nodes, the width layout, and the public set.

mod cluster;
mod iter;
mod layout;
mod leaf;
mod node;
mod set;

pub use cluster::Cluster;
pub use iter::{Iter, Range};
pub use layout::{Bits, Layout, NodeFor};
pub use leaf::Leaf;
pub use node::VebNode;
pub use set::OrderedIntSet;
