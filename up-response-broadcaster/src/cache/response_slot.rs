/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Single-slot holder for the most recently committed response.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Thread-safe holder of at most one response.
///
/// Values are stored behind an [`Arc`] so a reader gets a complete, immutable
/// handle without copying under the lock. The lock covers only the pointer swap
/// or clone; callers never hold it across solver or publish I/O.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use up_response_broadcaster::ResponseSlot;
///
/// let slot = ResponseSlot::new();
/// assert!(slot.get().is_none());
///
/// slot.set(Arc::new("first"));
/// slot.set(Arc::new("second"));
/// assert_eq!(*slot.get().unwrap(), "second");
/// ```
#[derive(Debug)]
pub struct ResponseSlot<T> {
    latest: Mutex<Option<Arc<T>>>,
}

impl<T> ResponseSlot<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            latest: Mutex::new(None),
        }
    }

    /// Replaces the held value. The previous value, if any, is released after
    /// the lock is dropped.
    pub fn set(&self, response: Arc<T>) {
        let previous = {
            let mut latest = self.lock();
            latest.replace(response)
        };
        drop(previous);
    }

    /// Returns a handle to the current value, or `None` if nothing was set yet.
    pub fn get(&self) -> Option<Arc<T>> {
        self.lock().clone()
    }

    /// Whether at least one value has been committed.
    pub fn is_armed(&self) -> bool {
        self.lock().is_some()
    }

    // The critical sections cannot leave the slot half-written, so a poisoned
    // lock still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for ResponseSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
