//! Pooled scratch memory for codec sessions
//!
//! A codec acquires its scratch buffers when the factory builds it and
//! holds them for the whole session. Buffers go back to the pool when the
//! [`PooledBuffer`] is dropped, so success, error and cancellation paths
//! all release them the same way.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};

use crate::tiff::errors::{CodecError, CodecResult};

/// Free buffers kept for reuse; anything beyond is released to the allocator
const MAX_RETAINED_BUFFERS: usize = 32;

#[derive(Debug, Default)]
struct PoolState {
    free: Vec<Vec<u8>>,
    /// Capacity currently lent out
    outstanding_bytes: usize,
    /// Number of live leases
    outstanding_buffers: usize,
}

#[derive(Debug)]
struct PoolInner {
    state: Mutex<PoolState>,
    /// Upper bound on outstanding capacity, if any
    limit: Option<usize>,
}

/// Shared pool of reusable byte buffers
///
/// Cloning the pool shares it; it can be handed to codecs on other threads.
#[derive(Debug, Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

impl BufferPool {
    /// Create a pool without a size limit
    pub fn new() -> Self {
        BufferPool {
            inner: Arc::new(PoolInner { state: Mutex::new(PoolState::default()), limit: None }),
        }
    }

    /// Create a pool that lends out at most `limit` bytes at a time
    pub fn with_limit(limit: usize) -> Self {
        BufferPool {
            inner: Arc::new(PoolInner { state: Mutex::new(PoolState::default()), limit: Some(limit) }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        // A panic while holding the lock cannot leave the free list inconsistent
        match self.inner.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Lease an empty buffer with at least `capacity` bytes reserved
    pub fn acquire(&self, capacity: usize) -> CodecResult<PooledBuffer> {
        let mut state = self.lock();

        if let Some(limit) = self.inner.limit {
            let available = limit.saturating_sub(state.outstanding_bytes);
            if capacity > available {
                warn!("Scratch pool exhausted: {} bytes requested, {} available", capacity, available);
                return Err(CodecError::ResourceExhausted { requested: capacity, available });
            }
        }

        let reuse = state.free.iter()
            .position(|buf| buf.capacity() >= capacity)
            .or_else(|| if state.free.is_empty() { None } else { Some(state.free.len() - 1) });
        let mut buffer = match reuse {
            Some(index) => state.free.swap_remove(index),
            None => Vec::new(),
        };
        buffer.clear();

        if buffer.try_reserve_exact(capacity).is_err() {
            return Err(CodecError::ResourceExhausted { requested: capacity, available: 0 });
        }

        state.outstanding_bytes += capacity;
        state.outstanding_buffers += 1;
        debug!("Leased {} byte scratch buffer ({} outstanding)", capacity, state.outstanding_buffers);

        Ok(PooledBuffer {
            buffer,
            reserved: capacity,
            pool: self.clone(),
        })
    }

    fn release(&self, mut buffer: Vec<u8>, reserved: usize) {
        let mut state = self.lock();
        state.outstanding_bytes = state.outstanding_bytes.saturating_sub(reserved);
        state.outstanding_buffers = state.outstanding_buffers.saturating_sub(1);
        if state.free.len() < MAX_RETAINED_BUFFERS {
            buffer.clear();
            state.free.push(buffer);
        }
    }

    /// Number of buffers currently leased
    pub fn outstanding(&self) -> usize {
        self.lock().outstanding_buffers
    }

    /// Bytes currently leased
    pub fn outstanding_bytes(&self) -> usize {
        self.lock().outstanding_bytes
    }

    /// Number of idle buffers held for reuse
    pub fn idle(&self) -> usize {
        self.lock().free.len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffer leased from a [`BufferPool`], returned on drop
pub struct PooledBuffer {
    buffer: Vec<u8>,
    reserved: usize,
    pool: BufferPool,
}

impl PooledBuffer {
    /// Capacity that was requested when leasing
    pub fn reserved(&self) -> usize {
        self.reserved
    }
}

impl Deref for PooledBuffer {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.buffer.len())
            .field("reserved", &self.reserved)
            .finish()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let buffer = std::mem::take(&mut self.buffer);
        self.pool.release(buffer, self.reserved);
    }
}
