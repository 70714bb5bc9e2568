//! Scoped builder contexts.
//!
//! - [`BlockContext`] - Statement sequence inside a function, loop or branch
//! - [`ConditionalChain`] - `elif`/`else` continuation of an `if`
//! - [`Function`] - Function and method definitions
//! - [`ClassContext`] - Class bodies with a synthesized constructor

mod block;
mod class;
mod conditional;
mod function;

pub use block::BlockContext;
pub use class::ClassContext;
pub use conditional::ConditionalChain;
pub use function::Function;

pub(crate) use block::open_block;
