/// Handle returned when subscribing to a [`TimeController`](super::TimeController)
/// notification. Pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

type Callback<T> = Box<dyn FnMut(T) + Send + Sync>;

/// Ordered list of callbacks for one notification channel.
///
/// Callbacks are invoked synchronously in subscription order.
pub struct ObserverList<T> {
    observers: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for ObserverList<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<T: Copy> ObserverList<T> {
    pub fn insert(&mut self, id: SubscriptionId, callback: impl FnMut(T) + Send + Sync + 'static) {
        self.observers.push((id, Box::new(callback)));
    }

    /// Returns false if `id` was not subscribed to this list.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        match self.observers.iter().position(|(observer_id, _)| *observer_id == id) {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn notify(&mut self, value: T) {
        for (_, callback) in self.observers.iter_mut() {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
