//! Fixed-capacity stack-discipline allocator with transparent heap fallback
//!
//! This crate provides a small arena primitive for LIFO allocation
//! patterns (scratch buffers, arena-backed temporaries) where avoiding
//! heap traffic materially improves latency:
//!
//! - [`StackBuffer`]: a fixed-size, fixed-alignment byte region with a
//!   bump cursor, reserved once and shared by any number of handles
//! - [`StackAllocator`]: a copyable handle implementing [`RawAllocator`],
//!   preferring the buffer and delegating to an embedded fallback
//!   allocator when the buffer is exhausted
//! - [`TypedStackAllocator`]: an element-typed surface with count-based
//!   allocation and `rebind` for container internals
//!
//! # Features
//!
//! - `logging` (default): trace-level logging of fallback delegation
//!
//! # Example
//!
//! ```
//! use stackalloc::{StackBuffer, StackAllocator, RawAllocator};
//! use std::alloc::Layout;
//!
//! let buffer: StackBuffer<1024> = StackBuffer::new();
//! let alloc = StackAllocator::new(&buffer);
//!
//! let layout = Layout::from_size_align(64, 8).unwrap();
//! let ptr = unsafe { alloc.allocate(layout) }.unwrap();
//! assert!(alloc.contains(ptr.cast::<u8>().as_ptr()));
//!
//! unsafe { alloc.deallocate(ptr.cast(), layout) };
//! assert_eq!(buffer.used(), 0);
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod align;
pub mod allocator;
pub mod buffer;
pub mod error;
pub mod utils;

pub use align::{Align1, Align2, Align4, Align8, Align16, Align32, Align64, Alignment, MaxAlign};
pub use allocator::{
    MemoryUsage, RawAllocator, StackAllocator, SystemAllocator, TypedStackAllocator,
};
pub use buffer::StackBuffer;
pub use error::{AllocError, AllocResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
