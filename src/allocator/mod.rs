//! Allocator handles and the allocator contract
//!
//! - `traits` - the [`RawAllocator`] contract and memory introspection
//! - `system` - [`SystemAllocator`], the default fallback delegate
//! - `stack` - [`StackAllocator`], bump allocation with LIFO reclaim
//! - `typed` - [`TypedStackAllocator`], element-typed surface with rebind

mod stack;
mod system;
mod traits;
mod typed;

pub use stack::StackAllocator;
pub use system::SystemAllocator;
pub use traits::{MemoryUsage, RawAllocator};
pub use typed::TypedStackAllocator;

pub use crate::error::{AllocError, AllocResult};
