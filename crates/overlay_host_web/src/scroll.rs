//! Nesting counter for the document scroll lock.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Tracks nested locks and the `overflow` value to restore when the last one is released.
pub struct ScrollLockState {
    depth: usize,
    saved_overflow: Option<String>,
}

impl ScrollLockState {
    /// Registers a lock. Returns `true` when this is the outermost lock and the caller must
    /// apply `overflow: hidden`; `current_overflow` is saved for the matching unlock.
    pub fn lock(&mut self, current_overflow: &str) -> bool {
        self.depth += 1;
        if self.depth == 1 {
            self.saved_overflow = Some(current_overflow.to_string());
            return true;
        }
        false
    }

    /// Releases a lock. Returns the saved `overflow` value once the last lock is gone.
    pub fn unlock(&mut self) -> Option<String> {
        if self.depth == 0 {
            tracing::debug!("scroll unlock without a matching lock");
            return None;
        }
        self.depth -= 1;
        if self.depth == 0 {
            return Some(self.saved_overflow.take().unwrap_or_default());
        }
        None
    }

    /// Outstanding locks.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
