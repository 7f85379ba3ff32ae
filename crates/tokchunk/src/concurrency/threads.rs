//! # Thread Utilities

use core::num::NonZeroU64;
use std::num::NonZeroUsize;
use std::thread;

/// Current Thread -> usize hash.
///
/// ``thread::current().id().as_u64()`` is unstable.
pub fn unstable_current_thread_id_hash() -> usize {
    // c/o `tiktoken`:
    // It's easier to use unsafe than to use nightly. Rust has this nice u64 thread id counter
    // that works great for our use case of avoiding collisions in our array. Unfortunately,
    // it's private. However, there are only so many ways you can layout a u64, so just transmute
    // https://github.com/rust-lang/rust/issues/67939
    struct FakeThreadId(NonZeroU64);
    const _: [u8; 8] = [0; std::mem::size_of::<std::thread::ThreadId>()];
    const _: [u8; 8] = [0; std::mem::size_of::<FakeThreadId>()];
    let val = unsafe {
        std::mem::transmute::<std::thread::ThreadId, FakeThreadId>(thread::current().id()).0
    };
    u64::from(val) as usize
}

/// Get the max parallelism available.
pub fn est_max_parallelism() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Resolve the max pool size.
///
/// ``min(max_pool, thread::available_parallelism())``
pub fn resolve_max_pool(max_pool: Option<NonZeroUsize>) -> usize {
    let sys_max = est_max_parallelism();

    let max_pool = max_pool.map(|x| x.get()).unwrap_or(sys_max);

    core::cmp::min(max_pool, sys_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_id_hash_is_stable() {
        assert_eq!(
            unstable_current_thread_id_hash(),
            unstable_current_thread_id_hash()
        );
    }

    #[test]
    fn test_resolve_max_pool() {
        let sys_max = est_max_parallelism();
        assert!(sys_max >= 1);

        assert_eq!(resolve_max_pool(None), sys_max);
        assert_eq!(resolve_max_pool(NonZeroUsize::new(1)), 1);
    }
}
