/// A handle for one registered change listener.
/// Handles are never reused, so unsubscribing twice is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A set of change listeners, notified synchronously when something changes.
///
/// Callbacks take no arguments. This is coarse-grained invalidation, not a
/// diff stream: a notified consumer is expected to re-fetch whatever snapshot
/// it displays. An observer that switches between maps must unsubscribe from
/// the old map before subscribing to the new one, so that it neither receives
/// notifications for a map it no longer shows nor keeps a closed map alive.
pub struct ListenerSet {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut()>)>,
}

impl ListenerSet {
    pub fn new() -> ListenerSet {
        ListenerSet {
            next_id: 0,
            listeners: vec![],
        }
    }

    /// Registers a listener and returns the handle needed to remove it.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() < before
    }

    /// Invokes every registered listener, in subscription order.
    pub fn notify_all(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for ListenerSet {
    fn default() -> Self {
        Self::new()
    }
}
