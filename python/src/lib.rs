// python/src/lib.rs
//! Python bindings for buffer-utils using PyO3

use pyo3::prelude::*;
use pyo3::buffer::PyBuffer;
use pyo3::exceptions::{PyBufferError, PyTypeError};
use pyo3::types::PyModule;

// Re-export the main library
use buffer_utils as utils;

fn buffer_error_to_pyerr(err: utils::BufferError) -> PyErr {
    // `PyBuffer::<u64>::get` already rejects other widths and kinds, but it
    // accepts any byte-order prefix; a non-native `>Q` lands here.
    match err {
        utils::BufferError::IncompatibleElement { .. } | utils::BufferError::ItemSizeMismatch { .. } => {
            PyTypeError::new_err(err.to_string())
        }
        _ => PyBufferError::new_err(err.to_string()),
    }
}

/// Describe an acquired export in host-neutral terms
fn layout_of(buffer: &PyBuffer<u64>) -> PyResult<utils::BufferLayout> {
    let format = buffer.format().to_str()
        .map_err(|_| PyTypeError::new_err("Buffer format string is not valid UTF-8"))?;

    Ok(utils::BufferLayout {
        format: format.to_owned(),
        item_size: buffer.item_size(),
        len_bytes: buffer.len_bytes(),
        shape: buffer.shape().to_vec(),
        strides: Some(buffer.strides().to_vec()),
        readonly: buffer.readonly(),
    })
}

/// Sum all elements of a uint64 buffer, wrapping modulo 2**64
#[pyfunction]
#[pyo3(name = "sum")]
fn buffer_sum(py: Python<'_>, data: &Bound<'_, PyAny>) -> PyResult<u64> {
    let buffer = PyBuffer::<u64>::get(data)?;
    let layout = layout_of(&buffer)?;

    // SAFETY: the export stays alive until `release` below and the GIL is
    // held for the whole call, so no Python code can resize the memory.
    let total = unsafe { utils::BufferView::from_layout(buffer.buf_ptr() as *const u8, &layout) }
        .map(|view| utils::sum(&view))
        .map_err(buffer_error_to_pyerr);

    buffer.release(py);
    total
}

/// Reverse the elements of a writable uint64 buffer in place
#[pyfunction]
#[pyo3(name = "reverse")]
fn buffer_reverse(py: Python<'_>, data: &Bound<'_, PyAny>) -> PyResult<()> {
    let buffer = PyBuffer::<u64>::get(data)?;
    let layout = layout_of(&buffer)?;

    // SAFETY: as in `buffer_sum`; the layout check rejects read-only
    // exports before the memory is viewed mutably.
    let result = unsafe { utils::BufferViewMut::from_layout(buffer.buf_ptr() as *mut u8, &layout) }
        .map(|mut view| utils::reverse(&mut view))
        .map_err(buffer_error_to_pyerr);

    buffer.release(py);
    result
}

/// Python module exposing the `buffers` submodule
#[pymodule]
fn example(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    let buffers = PyModule::new(py, "buffers")?;
    buffers.add_function(wrap_pyfunction!(buffer_sum, &buffers)?)?;
    buffers.add_function(wrap_pyfunction!(buffer_reverse, &buffers)?)?;
    m.add_submodule(&buffers)?;

    // Make `import example.buffers` work as well as attribute access
    py.import("sys")?
        .getattr("modules")?
        .set_item("example.buffers", &buffers)?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
