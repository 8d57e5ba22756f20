mod arena;
mod check;
mod handle;
mod linkage;
mod navigate;
mod node;
mod pretty;
mod raw_tree;

pub(crate) use handle::Link;
pub(crate) use pretty::Pretty;
pub(crate) use raw_tree::RawTree;
