// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run caller code only while holding a lock

use super::protocol::LockEngine;
use super::CoordinationError;
use crate::clock::Clock;
use crate::id::LockName;

/// The acquire/granted surface `Required` needs
pub trait LockApi {
    type Error;

    fn acquire(&mut self, lock: &LockName) -> Result<bool, Self::Error>;

    fn granted(&self, lock: &LockName) -> Result<bool, Self::Error>;
}

impl<K: Clock> LockApi for LockEngine<K> {
    type Error = CoordinationError;

    fn acquire(&mut self, lock: &LockName) -> Result<bool, Self::Error> {
        LockEngine::acquire(self, lock)
    }

    fn granted(&self, lock: &LockName) -> Result<bool, Self::Error> {
        Ok(LockEngine::granted(self, lock))
    }
}

/// A body that runs only under `lock`
pub struct Required<G, F> {
    lock: LockName,
    guard: G,
    body: F,
}

/// Wrap `body` so it runs when `lock` is already held, or when `guard`
/// passes and the lock can be acquired on the spot.
///
/// A guard that returns false never requests the lock.
pub fn require_if<G, F, R>(lock: impl Into<LockName>, guard: G, body: F) -> Required<G, F>
where
    G: FnMut() -> bool,
    F: FnMut() -> R,
{
    Required {
        lock: lock.into(),
        guard,
        body,
    }
}

/// Wrap `body` so it runs under `lock`, always requesting it
pub fn require<F, R>(lock: impl Into<LockName>, body: F) -> Required<fn() -> bool, F>
where
    F: FnMut() -> R,
{
    fn always() -> bool {
        true
    }
    require_if(lock, always as fn() -> bool, body)
}

impl<G, F, R> Required<G, F>
where
    G: FnMut() -> bool,
    F: FnMut() -> R,
{
    pub fn lock(&self) -> &LockName {
        &self.lock
    }

    /// Returns the body's value if it ran
    pub fn run<A: LockApi + ?Sized>(&mut self, api: &mut A) -> Result<Option<R>, A::Error> {
        if api.granted(&self.lock)? {
            return Ok(Some((self.body)()));
        }
        if (self.guard)() && api.acquire(&self.lock)? {
            return Ok(Some((self.body)()));
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "require_tests.rs"]
mod tests;
