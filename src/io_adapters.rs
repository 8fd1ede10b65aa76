use std::cell::RefCell;
use std::io::{Result as IoResult, Write};
use std::rc::Rc;

/// Memory-backed writer for capturing what a menu session prints.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// terminal owns another.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: create a writer and a second handle on the same bytes.
    pub fn with_handle() -> (Self, Self) {
        let writer = SharedBuffer::new();
        let handle = writer.clone();
        (writer, handle)
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    /// Drop everything written so far.
    pub fn clear(&self) {
        self.buf.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}
