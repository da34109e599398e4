// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::ops::DerefMut;

/// Blocking lock guarding state shared between a gate and its timer task.
///
/// Critical sections are short and never await, so a synchronous lock is
/// enough even on async runtimes.
pub trait SharedLock<T: ?Sized>: Send + Sync {
    type Guard<'a>: DerefMut<Target = T>
    where
        Self: 'a,
        T: 'a;

    fn new(value: T) -> Self
    where
        T: Sized;

    fn lock(&self) -> Self::Guard<'_>;

    /// Run `f` with the lock held and return its result.
    fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }
}
