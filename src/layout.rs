// src/layout.rs
use crate::error::{BufferError, Result};
use crate::types::ElementType;

/// Host-neutral description of a shared memory buffer
///
/// Mirrors the fields a buffer-protocol exporter hands out: the element
/// format string, the size of one item, the total byte length, the shape,
/// optional strides and the read-only flag. Validation decides whether the
/// memory can be viewed as a contiguous run of native-endian `u64` values.
///
/// # Example
///
/// ```
/// use buffer_utils::{BufferLayout, ElementType};
///
/// let layout = BufferLayout::contiguous("Q", 8, 5);
/// assert_eq!(layout.validate_read().unwrap(), ElementType::U64);
///
/// let frozen = BufferLayout::contiguous("Q", 8, 5).read_only();
/// assert!(frozen.validate_write().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferLayout {
    pub format: String,
    pub item_size: usize,
    pub len_bytes: usize,
    pub shape: Vec<usize>,
    /// `None` means C-contiguous, as with a NULL `strides` pointer
    pub strides: Option<Vec<isize>>,
    pub readonly: bool,
}

impl BufferLayout {
    /// One-dimensional, writable, contiguous layout holding `count` items
    pub fn contiguous(format: impl Into<String>, item_size: usize, count: usize) -> Self {
        BufferLayout {
            format: format.into(),
            item_size,
            len_bytes: count.saturating_mul(item_size),
            shape: vec![count],
            strides: None,
            readonly: false,
        }
    }

    pub fn with_shape(mut self, shape: Vec<usize>) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_strides(mut self, strides: Vec<isize>) -> Self {
        self.strides = Some(strides);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Number of items covered by the byte length
    pub fn item_count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.len_bytes / self.item_size
        }
    }

    /// Check that the buffer can be read as contiguous `u64` elements
    pub fn validate_read(&self) -> Result<ElementType> {
        let element = self.check_element()?;

        if self.item_size == 0 || self.len_bytes % self.item_size != 0 {
            return Err(self.reject(BufferError::InvalidLength {
                len: self.len_bytes,
                item_size: self.item_size,
            }));
        }

        let shape_items = self.shape_items();
        if shape_items != self.item_count() {
            return Err(self.reject(BufferError::ShapeMismatch {
                shape_items,
                actual_items: self.item_count(),
            }));
        }

        if !self.is_c_contiguous() {
            return Err(self.reject(BufferError::NotContiguous));
        }

        Ok(element)
    }

    /// Check that the buffer can be mutated in place as contiguous `u64` elements
    pub fn validate_write(&self) -> Result<ElementType> {
        if self.readonly {
            return Err(self.reject(BufferError::ReadOnly));
        }
        self.validate_read()
    }

    fn check_element(&self) -> Result<ElementType> {
        match ElementType::from_format(&self.format, self.item_size) {
            Some(ElementType::U64) => {}
            Some(other) => {
                return Err(self.reject(BufferError::IncompatibleElement {
                    expected: ElementType::U64.to_string(),
                    found: other.to_string(),
                }))
            }
            None => {
                return Err(self.reject(BufferError::IncompatibleElement {
                    expected: ElementType::U64.to_string(),
                    found: format!("format '{}'", self.format),
                }))
            }
        }

        let expected = ElementType::U64.fixed_size();
        if self.item_size != expected {
            return Err(self.reject(BufferError::ItemSizeMismatch {
                expected,
                found: self.item_size,
            }));
        }

        Ok(ElementType::U64)
    }

    /// Number of items the shape describes, saturating at `usize::MAX`
    ///
    /// An empty shape is a 0-dimensional buffer holding one item. Any zero
    /// axis makes the buffer empty whatever the other axes are.
    fn shape_items(&self) -> usize {
        if self.shape.contains(&0) {
            return 0;
        }
        self.shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .unwrap_or(usize::MAX)
    }

    fn is_c_contiguous(&self) -> bool {
        // Empty buffers address no memory, whatever their strides say
        if self.item_count() == 0 {
            return true;
        }
        let strides = match &self.strides {
            Some(strides) => strides,
            None => return true,
        };
        if strides.len() != self.shape.len() {
            return false;
        }

        let mut expected = self.item_size as isize;
        for (&dim, &stride) in self.shape.iter().zip(strides.iter()).rev() {
            // Strides of length-0 and length-1 axes are never used to address memory
            if dim > 1 && stride != expected {
                return false;
            }
            expected = match expected.checked_mul(dim as isize) {
                Some(next) => next,
                None => return false,
            };
        }
        true
    }

    fn reject(&self, err: BufferError) -> BufferError {
        log::debug!(
            "rejecting buffer (format={:?}, item_size={}, shape={:?}, strides={:?}, readonly={}): {}",
            self.format,
            self.item_size,
            self.shape,
            self.strides,
            self.readonly,
            err
        );
        err
    }
}
