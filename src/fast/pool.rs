//! Object pooling for fast requests and responses.
//!
//! # Responsibilities
//! - Hand out reusable request/response objects
//! - Return them on guard drop, on every exit path
//! - Bound the number of idle objects kept around

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

use crate::fast::{FastRequest, FastResponse};

/// Objects that can be cleared for reuse.
pub trait Recycle: Default + Send {
    /// Clear contents while keeping allocations.
    fn reset(&mut self);
}

/// Free list of reusable objects.
#[derive(Debug)]
pub struct Pool<T> {
    idle: Mutex<Vec<T>>,
    max_idle: usize,
}

impl<T: Recycle> Pool<T> {
    /// Create an empty pool keeping at most `max_idle` released objects.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take an idle object or build a fresh one.
    pub fn acquire(&self) -> Pooled<'_, T> {
        let value = self
            .idle
            .lock()
            .ok()
            .and_then(|mut idle| idle.pop())
            .unwrap_or_default();
        Pooled {
            pool: self,
            value: Some(value),
        }
    }

    /// Number of objects waiting for reuse.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    fn release(&self, mut value: T) {
        value.reset();
        if let Ok(mut idle) = self.idle.lock() {
            if idle.len() < self.max_idle {
                idle.push(value);
            }
        }
    }
}

/// A RAII guard that resets and returns its object to the pool on drop.
#[derive(Debug)]
pub struct Pooled<'a, T: Recycle> {
    pool: &'a Pool<T>,
    value: Option<T>,
}

impl<T: Recycle> Deref for Pooled<'_, T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        // Only `drop` takes the value out.
        self.value.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<T: Recycle> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<T: Recycle> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}

/// Request and response pools used by one adaptor.
#[derive(Debug)]
pub struct FastPool {
    requests: Pool<FastRequest>,
    responses: Pool<FastResponse>,
}

impl FastPool {
    pub fn new(max_idle: usize) -> Self {
        Self {
            requests: Pool::new(max_idle),
            responses: Pool::new(max_idle),
        }
    }

    pub fn acquire_request(&self) -> Pooled<'_, FastRequest> {
        self.requests.acquire()
    }

    pub fn acquire_response(&self) -> Pooled<'_, FastResponse> {
        self.responses.acquire()
    }

    pub fn requests(&self) -> &Pool<FastRequest> {
        &self.requests
    }

    pub fn responses(&self) -> &Pool<FastResponse> {
        &self.responses
    }
}

impl Default for FastPool {
    fn default() -> Self {
        Self::new(256)
    }
}
