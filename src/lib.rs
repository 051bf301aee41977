// src/lib.rs
//! # buffer-utils
//!
//! Sum and in-place reverse over caller-owned buffers of unsigned 64-bit
//! integers, shared without copying through a buffer-protocol style
//! memory view.
//!
//! ## Features
//!
//! - **Zero-copy**: operations borrow the caller's memory, never own it
//! - **Checked boundary**: element type, item size, contiguity and
//!   writability are validated before any element is touched
//! - **Infallible core**: `sum` wraps on overflow, `reverse` works in place
//!
//! ## Quick Start
//!
//! ```rust
//! use buffer_utils::*;
//!
//! fn main() -> Result<()> {
//!     let mut data = vec![1u64, 2, 3, 4, 5];
//!
//!     assert_eq!(ops::sum(&BufferView::new(&data)), 15);
//!
//!     ops::reverse(&mut BufferViewMut::new(&mut data));
//!     assert_eq!(data, vec![5, 4, 3, 2, 1]);
//!
//!     // Memory handed over by a host runtime is described by a layout first
//!     let layout = BufferLayout::contiguous("L", 8, data.len());
//!     let view = unsafe { BufferView::from_layout(data.as_ptr() as *const u8, &layout)? };
//!     assert_eq!(ops::sum(&view), 15);
//!
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod layout;
pub mod view;
pub mod ops;

// Re-export commonly used types at the crate root for convenience
pub use error::{BufferError, Result};
pub use types::ElementType;
pub use layout::BufferLayout;
pub use view::{BufferView, BufferViewMut};
pub use ops::{sum, reverse};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use buffer_utils::prelude::*;
    //! ```

    pub use crate::error::{BufferError, Result};
    pub use crate::layout::BufferLayout;
    pub use crate::ops::{reverse, sum};
    pub use crate::view::{BufferView, BufferViewMut};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
