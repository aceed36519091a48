//! Refresh coordinator: a payload-free publish/subscribe channel.
//!
//! Any component that completes a mutating write calls [`RefreshBus::notify`];
//! the explorer subscribes while mounted and re-assembles the whole snapshot
//! in response. The signal carries no diff information, so subscribers may
//! only conclude that a full re-assembly is warranted.

use std::sync::{Arc, Mutex, Weak};

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct BusInner {
	next_id: u64,
	subscribers: Vec<(u64, Callback)>,
}

/// Cloneable handle to the process-wide "graph changed" channel. Provided
/// through Leptos context so components never reach for ambient globals.
#[derive(Clone, Default)]
pub struct RefreshBus {
	inner: Arc<Mutex<BusInner>>,
}

impl RefreshBus {
	/// Register a callback for every future broadcast. Dropping the returned
	/// [`Subscription`] unsubscribes, which ties the registration to the
	/// subscribing component's activation window.
	pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
		let mut inner = self.inner.lock().unwrap();
		inner.next_id += 1;
		let id = inner.next_id;
		inner.subscribers.push((id, Arc::new(callback)));
		Subscription {
			id,
			bus: Arc::downgrade(&self.inner),
		}
	}

	/// Fire-and-forget broadcast to every live subscriber.
	pub fn notify(&self) {
		// Snapshot the list first so a callback may subscribe or drop a
		// subscription without deadlocking on the bus lock.
		let callbacks: Vec<Callback> = self
			.inner
			.lock()
			.unwrap()
			.subscribers
			.iter()
			.map(|(_, cb)| cb.clone())
			.collect();
		for callback in callbacks {
			callback();
		}
	}
}

/// RAII registration handle; dropping it removes the callback from the bus.
pub struct Subscription {
	id: u64,
	bus: Weak<Mutex<BusInner>>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(bus) = self.bus.upgrade() {
			bus.lock().unwrap().subscribers.retain(|(id, _)| *id != self.id);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[test]
	fn notify_reaches_every_subscriber() {
		let bus = RefreshBus::default();
		let hits = Arc::new(AtomicUsize::new(0));
		let (a, b) = (hits.clone(), hits.clone());
		let _sub_a = bus.subscribe(move || {
			a.fetch_add(1, Ordering::SeqCst);
		});
		let _sub_b = bus.subscribe(move || {
			b.fetch_add(1, Ordering::SeqCst);
		});
		bus.notify();
		bus.notify();
		assert_eq!(hits.load(Ordering::SeqCst), 4);
	}

	#[test]
	fn dropping_the_subscription_unsubscribes() {
		let bus = RefreshBus::default();
		let hits = Arc::new(AtomicUsize::new(0));
		let counter = hits.clone();
		let sub = bus.subscribe(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		});
		bus.notify();
		drop(sub);
		bus.notify();
		assert_eq!(hits.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn notify_without_subscribers_is_a_no_op() {
		RefreshBus::default().notify();
	}

	#[test]
	fn clones_share_one_channel() {
		let bus = RefreshBus::default();
		let hits = Arc::new(AtomicUsize::new(0));
		let counter = hits.clone();
		let _sub = bus.subscribe(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		});
		bus.clone().notify();
		assert_eq!(hits.load(Ordering::SeqCst), 1);
	}
}
