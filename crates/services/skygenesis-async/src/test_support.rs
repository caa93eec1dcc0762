//! Test-only helpers for tests that touch process environment variables.

/// Restores a set of environment variables to their original values on drop.
///
/// Tests using this must be marked `#[serial(env)]`: the process environment
/// is global and `set_var`/`remove_var` race with concurrent readers.
#[derive(Default)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    /// Sets `key` to `val` until the guard is dropped
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        Self::default().and_set(key, val)
    }

    /// Unsets `key` until the guard is dropped
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        Self::default().and_remove(key)
    }

    /// Also sets `key` to `val` under the same guard
    #[must_use]
    pub fn and_set(mut self, key: &'static str, val: &str) -> Self {
        self.saved.push((key, std::env::var(key).ok()));
        // SAFETY: callers serialise env access with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        self
    }

    /// Also unsets `key` under the same guard
    #[must_use]
    pub fn and_remove(mut self, key: &'static str) -> Self {
        self.saved.push((key, std::env::var(key).ok()));
        // SAFETY: callers serialise env access with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        self
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // Restore in reverse so a key touched twice ends at its first saved value.
        for (key, prev) in self.saved.drain(..).rev() {
            match prev {
                // SAFETY: see `and_set`.
                Some(v) => unsafe { std::env::set_var(key, v) },
                // SAFETY: see `and_remove`.
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
