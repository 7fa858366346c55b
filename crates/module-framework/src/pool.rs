//! # Bounded Resource Pool
//!
//! A capacity-limited set of reusable handles (playback channels, emitters, ...).
//!
//! ## Acquire Policy
//!
//! 1. **Reuse idle**: the first handle, in insertion order, that is not busy.
//! 2. **Grow**: if none is idle and the pool is below capacity, create one more handle.
//! 3. **Evict**: if the pool is full and every handle is busy, interrupt
//!    `handles[cursor]`, hand it out, and advance the cursor round-robin.
//!
//! The pool never tracks releases. Whether a handle is busy is asked of the handle itself
//! at acquire time ([`PoolHandle::is_busy`]). Eviction order depends only on the cursor, not
//! on when a handle was last used, so it approximates LRU without bookkeeping.
//!
//! ## Concurrency
//! `acquire` takes `&mut self`: the scan-grow-evict decision is exclusive. Wrap the pool in
//! a `Mutex` if it must be shared between threads.

use crate::error::FrameworkError;
use std::fmt;
use tracing::debug;

/// A unit managed by [`ResourcePool`].
pub trait PoolHandle {
    /// Whether the handle is currently in use (e.g. still playing).
    fn is_busy(&self) -> bool;

    /// Stops whatever the handle is doing before it is forcibly reassigned.
    fn interrupt(&mut self) {}
}

/// How an [`Acquired`] handle was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    Reused,
    Grown,
    Evicted,
}

/// A handle handed out by [`ResourcePool::acquire`].
#[derive(Debug)]
pub struct Acquired<'a, H> {
    /// Position of the handle in the pool.
    pub index: usize,
    pub kind: Acquisition,
    pub handle: &'a mut H,
}

type HandleFactory<H> = Box<dyn FnMut(usize) -> H + Send + Sync>;

/// Lazily growing pool with round-robin eviction once full.
pub struct ResourcePool<H> {
    capacity: usize,
    handles: Vec<H>,
    next_eviction: usize,
    factory: HandleFactory<H>,
}

impl<H: PoolHandle> ResourcePool<H> {
    /// Creates a pool holding one handle, able to grow to `capacity`.
    ///
    /// `factory` receives the index the new handle will occupy.
    ///
    /// # Errors
    /// [`FrameworkError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(
        capacity: usize,
        factory: impl FnMut(usize) -> H + Send + Sync + 'static,
    ) -> Result<Self, FrameworkError> {
        if capacity == 0 {
            return Err(FrameworkError::ZeroCapacity);
        }
        let mut factory: HandleFactory<H> = Box::new(factory);
        let first = factory(0);
        Ok(Self {
            capacity,
            handles: vec![first],
            next_eviction: 0,
            factory,
        })
    }

    /// Returns a handle for a new request. Always succeeds.
    pub fn acquire(&mut self) -> Acquired<'_, H> {
        if let Some(index) = self.handles.iter().position(|h| !h.is_busy()) {
            return Acquired {
                index,
                kind: Acquisition::Reused,
                handle: &mut self.handles[index],
            };
        }

        if self.handles.len() < self.capacity {
            let index = self.handles.len();
            let handle = (self.factory)(index);
            self.handles.push(handle);
            debug!(index, size = self.handles.len(), capacity = self.capacity, "Pool grew");
            return Acquired {
                index,
                kind: Acquisition::Grown,
                handle: &mut self.handles[index],
            };
        }

        let index = self.next_eviction;
        self.next_eviction = (self.next_eviction + 1) % self.capacity;
        debug!(index, next = self.next_eviction, "Pool full, evicting");
        let handle = &mut self.handles[index];
        handle.interrupt();
        Acquired {
            index,
            kind: Acquisition::Evicted,
            handle,
        }
    }
}

impl<H> ResourcePool<H> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Always `false`: a pool holds at least one handle.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.handles.len() == self.capacity
    }

    /// Index the next eviction will pick. Only meaningful once the pool is full.
    pub fn eviction_cursor(&self) -> Option<usize> {
        self.is_full().then_some(self.next_eviction)
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    pub fn get(&self, index: usize) -> Option<&H> {
        self.handles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut H> {
        self.handles.get_mut(index)
    }
}

impl<H> fmt::Debug for ResourcePool<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("capacity", &self.capacity)
            .field("len", &self.handles.len())
            .field("next_eviction", &self.next_eviction)
            .finish_non_exhaustive()
    }
}
