//! Thin wrappers over the futex syscall. Non-private operations, since the
//! word is shared between processes.

use std::sync::atomic::AtomicU32;

/// Sleep while `word` still holds `expected`. Returns on wake-up, on a value
/// mismatch and on signals; callers re-check their condition.
pub(crate) fn wait(word: &AtomicU32, expected: u32) {
    // SAFETY: the pointer comes from a live reference to an aligned u32 in a
    // mapping that outlives the call. A null timeout means wait forever.
    unsafe {
        libc::syscall(
            libc::SYS_futex,
            word.as_ptr(),
            libc::FUTEX_WAIT,
            expected,
            std::ptr::null::<libc::timespec>(),
        );
    }
}

/// Wake every waiter on `word`.
pub(crate) fn wake_all(word: &AtomicU32) {
    // SAFETY: as above; FUTEX_WAKE only reads the address.
    unsafe {
        libc::syscall(libc::SYS_futex, word.as_ptr(), libc::FUTEX_WAKE, i32::MAX);
    }
}
