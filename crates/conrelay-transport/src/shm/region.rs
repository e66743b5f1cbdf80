use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::ptr::NonNull;

use conrelay_common::TransportError;

use crate::segment::Segment;

/// A file mapped read-write and shared with every other process mapping it.
pub struct SharedRegion {
    ptr: NonNull<u8>,
    len: usize,
}

// SAFETY: the region is plain bytes owned by this value until drop. Access
// to the bytes is serialized by the gate protocol, and the gate words are
// only touched through atomics.
unsafe impl Send for SharedRegion {}
unsafe impl Sync for SharedRegion {}

impl SharedRegion {
    /// Map an existing file. Fails if it does not exist; nothing is created.
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| map_error(path, e.to_string()))?;
        let len = file
            .metadata()
            .map_err(|e| map_error(path, e.to_string()))?
            .len() as usize;
        Self::map(&file, len, path)
    }

    fn map(file: &File, len: usize, path: &Path) -> Result<Self, TransportError> {
        if len == 0 {
            return Err(map_error(path, "file is empty".into()));
        }
        // SAFETY: a fresh mapping of `len` bytes of an open file; the result
        // is checked against MAP_FAILED before use.
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(map_error(
                path,
                std::io::Error::last_os_error().to_string(),
            ));
        }
        let ptr = NonNull::new(ptr.cast::<u8>())
            .ok_or_else(|| map_error(path, "mmap returned null".into()))?;
        Ok(Self { ptr, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl Segment for SharedRegion {
    fn capacity(&self) -> usize {
        self.len
    }

    fn with_bytes<R>(&mut self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        // SAFETY: the mapping is valid for `len` bytes while `self` lives,
        // and `&mut self` plus the gate protocol make this the only access.
        let bytes = unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) };
        f(bytes)
    }
}

impl Drop for SharedRegion {
    fn drop(&mut self) {
        // SAFETY: unmapping exactly the range returned by mmap.
        unsafe {
            libc::munmap(self.ptr.as_ptr().cast(), self.len);
        }
    }
}

fn map_error(path: &Path, reason: String) -> TransportError {
    TransportError::Map {
        path: path.to_path_buf(),
        reason,
    }
}
