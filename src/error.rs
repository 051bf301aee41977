// src/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Incompatible element type: expected {expected}, found {found}")]
    IncompatibleElement { expected: String, found: String },

    #[error("Item size mismatch: expected {expected} bytes, found {found}")]
    ItemSizeMismatch { expected: usize, found: usize },

    #[error("Buffer is not contiguous")]
    NotContiguous,

    #[error("Buffer is read-only")]
    ReadOnly,

    #[error("Buffer address {address:#x} is not aligned to {align} bytes")]
    Misaligned { address: usize, align: usize },

    #[error("Invalid length: {len} bytes is not a multiple of {item_size}")]
    InvalidLength { len: usize, item_size: usize },

    #[error("Shape mismatch: shape describes {shape_items} items, buffer holds {actual_items}")]
    ShapeMismatch { shape_items: usize, actual_items: usize },
}

pub type Result<T> = std::result::Result<T, BufferError>;
