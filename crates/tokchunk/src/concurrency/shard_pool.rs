//! # Thread-Sharded Item Pool

use core::fmt::Debug;
use std::num::NonZeroUsize;

use crate::concurrency::threads;

/// Current Thread -> T Pool.
///
/// This struct provides a thread-id hashed pool of items.
/// Rather than pure thread-local storage, the pool is
/// initialized with a vector of items, and the current
/// thread's ID is hashed to pick the item.
///
/// The main use in this crate is giving each batch worker its own
/// compiled regex clone; `fancy_regex` instances contend when shared
/// across threads.
pub struct ShardPool<T>
where
    T: Clone + Send,
{
    pool: Vec<T>,
}

impl<T> AsRef<T> for ShardPool<T>
where
    T: Clone + Send,
{
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T> ShardPool<T>
where
    T: Clone + Send,
{
    /// Create a new thread-sharded pool with the given vector of items.
    pub fn new(pool: Vec<T>) -> Self {
        assert!(!pool.is_empty());
        Self { pool }
    }

    /// Initialize a new thread-sharded pool with the given item and maximum pool size.
    pub fn init(
        item: T,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        let max_pool = threads::resolve_max_pool(max_pool);

        Self::new(vec![item; max_pool])
    }

    /// Get a reference to the item for the current thread.
    pub fn get(&self) -> &T {
        let tid = threads::unstable_current_thread_id_hash();
        &self.pool[tid % self.pool.len()]
    }

    /// Get the length of the pool.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.pool.len()
    }
}

impl<T> Clone for ShardPool<T>
where
    T: Clone + Send,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

impl<T> Debug for ShardPool<T>
where
    T: Clone + Send + Debug,
{
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ShardPool")
            .field("item", &self.pool[0])
            .field("len", &self.pool.len())
            .finish()
    }
}
