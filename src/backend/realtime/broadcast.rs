/**
 * Real-time Broadcast Publisher
 *
 * This module provides the multicast channel that carries newly created
 * items to every live stream subscriber.
 *
 * # Delivery Model
 *
 * Each subscriber owns a bounded FIFO queue. `publish` appends the item to
 * every registered queue and wakes the owner; it never waits on a
 * subscriber. When a queue is already at capacity the OLDEST queued item
 * is discarded to make room and the subscriber's lag counter is bumped.
 * A slow subscriber therefore loses old items, while the producer and the
 * other subscribers are unaffected.
 *
 * # Ordering
 *
 * The registry lock is held for the whole fan-out, so concurrent
 * `publish` calls are applied one at a time and every subscriber observes
 * the same total order.
 *
 * # Lifetime
 *
 * A subscriber only sees items published after `subscribe` returned.
 * Dropping the `Subscription` removes it from the registry and frees its
 * queue immediately. `close` ends every subscription once its queue has
 * been drained.
 */

use crate::shared::Item;
use futures_util::stream::{self, Stream};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

/// Publisher specialised for item-creation events
///
/// This is the handle stored in application state and cloned into the
/// create handler and the stream handler.
pub type ItemUpdatesPublisher = Publisher<Item>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking subscriber must not take the whole feed down with it.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Per-subscriber delivery state
struct Slot<T> {
    queue: Mutex<VecDeque<T>>,
    notify: Notify,
    lagged: AtomicU64,
    closed: AtomicBool,
}

impl<T> Slot<T> {
    fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            notify: Notify::new(),
            lagged: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Queue an item, evicting the oldest one if the queue is full.
    /// Returns true when an item was evicted.
    fn push(&self, item: T, capacity: usize) -> bool {
        let evicted = {
            let mut queue = lock(&self.queue);
            let evicted = if queue.len() >= capacity {
                queue.pop_front();
                true
            } else {
                false
            };
            queue.push_back(item);
            evicted
        };

        if evicted {
            self.lagged.fetch_add(1, Ordering::Relaxed);
        }
        self.notify.notify_one();
        evicted
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.notify.notify_one();
    }
}

struct Shared<T> {
    subscribers: Mutex<HashMap<u64, Arc<Slot<T>>>>,
    next_id: AtomicU64,
    capacity: usize,
    closed: AtomicBool,
}

/// Multicast publisher with a bounded, drop-oldest queue per subscriber
///
/// Cloning is cheap; all clones share one subscriber registry.
pub struct Publisher<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Clone> Publisher<T> {
    /// Create a publisher whose subscribers may each hold up to `capacity`
    /// undelivered items. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                capacity: capacity.max(1),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Per-subscriber queue capacity
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Publish an item to every current subscriber
    ///
    /// Never blocks on a subscriber. Returns the number of subscribers the
    /// item was queued for (0 if nobody is listening, in which case the item
    /// is simply dropped).
    pub fn publish(&self, item: T) -> usize {
        let subscribers = lock(&self.shared.subscribers);

        if subscribers.is_empty() {
            tracing::debug!("[Realtime] No subscribers to receive item");
            return 0;
        }

        let capacity = self.shared.capacity;
        for (id, slot) in subscribers.iter() {
            if slot.push(item.clone(), capacity) {
                tracing::warn!(
                    subscriber = id,
                    capacity,
                    "[Realtime] Subscriber buffer full, dropped oldest item"
                );
            }
        }

        let delivered = subscribers.len();
        tracing::info!("[Realtime] Item broadcast to {} subscribers", delivered);
        delivered
    }

    /// Attach a new subscriber
    ///
    /// The subscription receives every item published after this call
    /// returns. If the publisher has been closed the subscription is already
    /// finished.
    pub fn subscribe(&self) -> Subscription<T> {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let slot = Arc::new(Slot::new(self.shared.capacity));

        {
            let mut subscribers = lock(&self.shared.subscribers);
            // Checked under the lock so a concurrent close cannot miss us.
            if self.shared.closed.load(Ordering::Acquire) {
                slot.close();
            } else {
                subscribers.insert(id, slot.clone());
                tracing::info!(
                    subscriber = id,
                    subscribers = subscribers.len(),
                    "[Realtime] Subscriber added"
                );
            }
        }

        Subscription {
            id,
            slot,
            shared: self.shared.clone(),
        }
    }

    /// Number of attached subscribers
    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.subscribers).len()
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// Shut the publisher down
    ///
    /// Every subscription finishes after yielding what is already queued.
    /// Later `publish` calls reach nobody.
    pub fn close(&self) {
        let mut subscribers = lock(&self.shared.subscribers);
        self.shared.closed.store(true, Ordering::Release);

        let count = subscribers.len();
        for (_, slot) in subscribers.drain() {
            slot.close();
        }
        tracing::info!("[Realtime] Publisher closed, released {} subscribers", count);
    }
}

/// One subscriber's view of a [`Publisher`]
///
/// Dropping the subscription detaches it.
pub struct Subscription<T> {
    id: u64,
    slot: Arc<Slot<T>>,
    shared: Arc<Shared<T>>,
}

impl<T> Subscription<T> {
    /// Registry id of this subscriber, used in logs
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Wait for the next item
    ///
    /// Returns `None` once the publisher is closed and the queue is empty.
    /// Cancel-safe: an item is only removed from the queue when it is
    /// returned.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            if let Some(item) = self.try_recv() {
                return Some(item);
            }
            if self.slot.closed.load(Ordering::Acquire) {
                // An item may have landed between the pop and the flag check.
                return self.try_recv();
            }
            self.slot.notify.notified().await;
        }
    }

    /// Take the next queued item without waiting
    pub fn try_recv(&mut self) -> Option<T> {
        lock(&self.slot.queue).pop_front()
    }

    /// Number of items currently waiting in this subscriber's queue
    pub fn pending(&self) -> usize {
        lock(&self.slot.queue).len()
    }

    /// Return how many items were dropped for this subscriber since the
    /// last call, resetting the counter
    pub fn take_lagged(&self) -> u64 {
        self.slot.lagged.swap(0, Ordering::Relaxed)
    }

    /// Convert into a lazy stream that ends when the publisher closes
    pub fn into_stream(self) -> impl Stream<Item = T> + Send
    where
        T: Send + 'static,
    {
        stream::unfold(self, |mut subscription| async move {
            let item = subscription.recv().await?;
            Some((item, subscription))
        })
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let removed = lock(&self.shared.subscribers).remove(&self.id);
        if removed.is_some() {
            tracing::debug!(subscriber = self.id, "[Realtime] Subscriber removed");
        }
    }
}
