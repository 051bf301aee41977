// src/view.rs
use crate::error::{BufferError, Result};
use crate::layout::BufferLayout;
use crate::types::ElementType;
use bytemuck::PodCastError;
use std::mem;
use std::slice;

/// Read-only borrowed view over caller-owned `u64` elements
///
/// The view never owns, allocates, resizes or frees the memory it points
/// at. It is valid only for the lifetime `'a` of the borrow it was built
/// from, which for host-exported buffers is the duration of one call.
///
/// # Example
///
/// ```
/// use buffer_utils::{BufferView, ElementType};
///
/// let data = [1u64, 2, 3];
/// let view = BufferView::new(&data);
///
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.element_type(), ElementType::U64);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    data: &'a [u64],
    element_type: ElementType,
}

/// Mutable borrowed view over caller-owned `u64` elements
///
/// Same ownership rules as [`BufferView`]; the holder has exclusive access
/// to the elements for `'a`.
#[derive(Debug)]
pub struct BufferViewMut<'a> {
    data: &'a mut [u64],
    element_type: ElementType,
}

impl<'a> BufferView<'a> {
    pub fn new(data: &'a [u64]) -> Self {
        BufferView {
            data,
            element_type: ElementType::U64,
        }
    }

    /// Reinterpret native-endian bytes as `u64` elements without copying
    ///
    /// Fails if the slice is not 8-byte aligned or its length is not a
    /// multiple of 8.
    ///
    /// ```
    /// use buffer_utils::BufferView;
    ///
    /// let words = [7u64, 9];
    /// let bytes: &[u8] = bytemuck::cast_slice(&words[..]);
    ///
    /// let view = BufferView::try_from_bytes(bytes).unwrap();
    /// assert_eq!(view.as_slice(), &[7, 9]);
    /// assert!(BufferView::try_from_bytes(&bytes[..12]).is_err());
    /// ```
    pub fn try_from_bytes(bytes: &'a [u8]) -> Result<Self> {
        bytemuck::try_cast_slice(bytes)
            .map(Self::new)
            .map_err(|e| cast_error(e, bytes.as_ptr() as usize, bytes.len()))
    }

    /// Build a view over memory described by a host buffer layout.
    ///
    /// The layout is validated for read access first; a null or dangling
    /// pointer is fine when the buffer holds no items.
    ///
    /// # Safety
    ///
    /// When the layout describes at least one item, `ptr` must point to
    /// `layout.len_bytes` initialized bytes that stay valid and are not
    /// mutated for all of `'a`.
    pub unsafe fn from_layout(ptr: *const u8, layout: &BufferLayout) -> Result<Self> {
        let element_type = layout.validate_read()?;
        let len = layout.item_count();
        if len == 0 {
            return Ok(BufferView { data: &[], element_type });
        }
        check_alignment(ptr as usize)?;

        // SAFETY: alignment and item count checked above; validity and
        // lifetime are the caller's contract.
        let data = slice::from_raw_parts(ptr as *const u64, len);
        Ok(BufferView { data, element_type })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn as_slice(&self) -> &'a [u64] {
        self.data
    }

    pub fn iter(&self) -> slice::Iter<'a, u64> {
        self.data.iter()
    }
}

impl<'a> From<&'a [u64]> for BufferView<'a> {
    fn from(data: &'a [u64]) -> Self {
        BufferView::new(data)
    }
}

impl<'a> IntoIterator for BufferView<'a> {
    type Item = &'a u64;
    type IntoIter = slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a> BufferViewMut<'a> {
    pub fn new(data: &'a mut [u64]) -> Self {
        BufferViewMut {
            data,
            element_type: ElementType::U64,
        }
    }

    /// Mutable counterpart of [`BufferView::try_from_bytes`]
    pub fn try_from_bytes_mut(bytes: &'a mut [u8]) -> Result<Self> {
        let address = bytes.as_ptr() as usize;
        let len = bytes.len();
        bytemuck::try_cast_slice_mut(bytes)
            .map(Self::new)
            .map_err(|e| cast_error(e, address, len))
    }

    /// Build a mutable view over memory described by a host buffer layout.
    ///
    /// The layout is validated for write access first, so read-only
    /// exports are rejected before any element is touched.
    ///
    /// # Safety
    ///
    /// When the layout describes at least one item, `ptr` must point to
    /// `layout.len_bytes` initialized bytes that stay valid for all of `'a`
    /// and are not accessed through any other path during that time.
    pub unsafe fn from_layout(ptr: *mut u8, layout: &BufferLayout) -> Result<Self> {
        let element_type = layout.validate_write()?;
        let len = layout.item_count();
        if len == 0 {
            return Ok(BufferViewMut { data: &mut [], element_type });
        }
        check_alignment(ptr as usize)?;

        // SAFETY: alignment and item count checked above; validity,
        // exclusivity and lifetime are the caller's contract.
        let data = slice::from_raw_parts_mut(ptr as *mut u64, len);
        Ok(BufferViewMut { data, element_type })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn as_slice(&self) -> &[u64] {
        &*self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut *self.data
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> BufferView<'_> {
        BufferView {
            data: &*self.data,
            element_type: self.element_type,
        }
    }
}

impl<'a> From<&'a mut [u64]> for BufferViewMut<'a> {
    fn from(data: &'a mut [u64]) -> Self {
        BufferViewMut::new(data)
    }
}

fn check_alignment(address: usize) -> Result<()> {
    let align = mem::align_of::<u64>();
    if address % align != 0 {
        return Err(BufferError::Misaligned { address, align });
    }
    Ok(())
}

fn cast_error(err: PodCastError, address: usize, len: usize) -> BufferError {
    match err {
        PodCastError::TargetAlignmentGreaterAndInputNotAligned | PodCastError::AlignmentMismatch => {
            BufferError::Misaligned {
                address,
                align: mem::align_of::<u64>(),
            }
        }
        PodCastError::OutputSliceWouldHaveSlop | PodCastError::SizeMismatch => BufferError::InvalidLength {
            len,
            item_size: mem::size_of::<u64>(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_accessors() {
        let data = [4u64, 5, 6];
        let view = BufferView::from(&data[..]);
        assert_eq!(view.len(), 3);
        assert!(!view.is_empty());
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
        assert_eq!(view.into_iter().count(), 3);

        let empty = BufferView::new(&[]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_mut_view_writes_through() {
        let mut data = vec![1u64, 2, 3];
        {
            let mut view = BufferViewMut::new(&mut data);
            view.as_mut_slice()[0] = 10;
            assert_eq!(view.as_view().as_slice(), &[10, 2, 3]);
        }
        assert_eq!(data, vec![10, 2, 3]);
    }

    #[test]
    fn test_try_from_bytes_rejects_slop() {
        let words = [1u64, 2];
        let bytes: &[u8] = bytemuck::cast_slice(&words[..]);
        let err = BufferView::try_from_bytes(&bytes[..15]).unwrap_err();
        assert_eq!(err, BufferError::InvalidLength { len: 15, item_size: 8 });
    }

    #[test]
    fn test_try_from_bytes_rejects_misaligned() {
        let words = [0u64; 3];
        let bytes: &[u8] = bytemuck::cast_slice(&words[..]);
        let err = BufferView::try_from_bytes(&bytes[1..17]).unwrap_err();
        assert!(matches!(err, BufferError::Misaligned { align: 8, .. }));
    }

    #[test]
    fn test_try_from_bytes_mut() {
        let mut words = [1u64, 2];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut words[..]);
        let mut view = BufferViewMut::try_from_bytes_mut(bytes).unwrap();
        view.as_mut_slice().swap(0, 1);
        assert_eq!(words, [2, 1]);
    }

    #[test]
    fn test_from_layout() {
        let words = [3u64, 1, 4];
        let layout = BufferLayout::contiguous("Q", 8, words.len());
        let view = unsafe { BufferView::from_layout(words.as_ptr() as *const u8, &layout) }.unwrap();
        assert_eq!(view.as_slice(), &words);
    }

    #[test]
    fn test_from_layout_empty_accepts_null() {
        let layout = BufferLayout::contiguous("L", 8, 0);
        let view = unsafe { BufferView::from_layout(std::ptr::null(), &layout) }.unwrap();
        assert!(view.is_empty());

        let view = unsafe { BufferViewMut::from_layout(std::ptr::null_mut(), &layout) }.unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_from_layout_empty_multidimensional() {
        let layout = BufferLayout::contiguous("Q", 8, 0)
            .with_shape(vec![3, 0])
            .with_strides(vec![8, 8]);
        let view = unsafe { BufferView::from_layout(std::ptr::null(), &layout) }.unwrap();
        assert_eq!(crate::ops::sum(&view), 0);

        let mut view = unsafe { BufferViewMut::from_layout(std::ptr::null_mut(), &layout) }.unwrap();
        crate::ops::reverse(&mut view);
        assert!(view.is_empty());
    }

    #[test]
    fn test_from_layout_validates_first() {
        let mut words = [3u64, 1, 4];
        let layout = BufferLayout::contiguous("Q", 8, words.len()).read_only();
        let err = unsafe { BufferViewMut::from_layout(words.as_mut_ptr() as *mut u8, &layout) }.unwrap_err();
        assert_eq!(err, BufferError::ReadOnly);

        let layout = BufferLayout::contiguous("d", 8, words.len());
        let err = unsafe { BufferView::from_layout(words.as_ptr() as *const u8, &layout) }.unwrap_err();
        assert!(matches!(err, BufferError::IncompatibleElement { .. }));
    }

    #[test]
    fn test_from_layout_rejects_misaligned_pointer() {
        let words = [0u64; 3];
        let layout = BufferLayout::contiguous("Q", 8, 2);
        let ptr = unsafe { (words.as_ptr() as *const u8).add(4) };
        let err = unsafe { BufferView::from_layout(ptr, &layout) }.unwrap_err();
        assert!(matches!(err, BufferError::Misaligned { align: 8, .. }));
    }
}
