use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// One mutating action on one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    AddResource,
    EditResource(i64),
    DeleteResource(i64),
    CreatePost,
    ToggleLike(i64),
    Comment(i64),
    SaveEdit(i64),
    DeletePost(i64),
}

/// Keys of requests that have been sent and not yet resolved.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
}

impl InFlight {
    /// `None` when the same action is already running.
    pub fn try_begin(&self, key: ActionKey) -> Option<InFlightGuard> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key) {
            return None;
        }
        Some(InFlightGuard { keys: Arc::clone(&self.keys), key })
    }

    pub fn is_active(&self, key: ActionKey) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
    key: ActionKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
