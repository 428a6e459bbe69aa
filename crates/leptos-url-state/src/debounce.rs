//! Debouncing
//!
//! Signal debouncing built on gloo timers, plus the generation counter it uses
//! to cancel superseded timers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Shared ticket counter
///
/// Every `next()` supersedes all earlier tickets. Clones share the same counter,
/// so a clone moved into a future can check whether its work is still wanted.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter invalidated when the current reactive owner is cleaned up.
    ///
    /// Async work started by a component checks its ticket after every await;
    /// once the component unmounts no ticket is current again.
    pub fn scoped() -> Self {
        let generation = Self::new();
        let handle = generation.clone();
        on_cleanup(move || handle.invalidate());
        generation
    }

    /// Issue a new ticket
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True when no ticket was issued after `ticket`
    pub fn is_current(&self, ticket: u64) -> bool {
        self.counter.load(Ordering::SeqCst) == ticket
    }

    /// Supersede every outstanding ticket
    pub fn invalidate(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }
}

/// Settled value of a debounced source
///
/// Each source change takes a ticket. Only the timer holding the latest ticket
/// may publish, and only a value that differs from the current one.
#[derive(Clone)]
struct Debounced<T: Send + Sync + 'static> {
    value: RwSignal<T>,
    generation: Generation,
}

impl<T> Debounced<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn new(initial: T) -> Self {
        Self {
            value: RwSignal::new(initial),
            generation: Generation::scoped(),
        }
    }

    fn schedule(&self) -> u64 {
        self.generation.next()
    }

    /// Publish `value` for `ticket`; true when the signal changed
    fn settle(&self, ticket: u64, value: T) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        match self.value.try_get_untracked() {
            Some(current) if current != value => self.value.try_set(value).is_none(),
            _ => false,
        }
    }

    fn read_only(&self) -> ReadSignal<T> {
        self.value.read_only()
    }
}

/// Follow `source` once it has been unchanged for `delay_ms`.
///
/// The returned signal starts with the source's current value. Each change
/// restarts the wait; equal values are not re-emitted. Pending timers are
/// dropped when the calling component unmounts.
pub fn use_debounced<T>(source: Signal<T>, delay_ms: u32) -> ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let debounced = Debounced::new(source.get_untracked());
    let output = debounced.read_only();

    Effect::new(move |previous: Option<()>| {
        let value = source.get();
        let ticket = debounced.schedule();
        if previous.is_none() {
            return;
        }

        let debounced = debounced.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            debounced.settle(ticket, value);
        });
    });

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let generation = Generation::new();
        let first = generation.next();
        assert!(generation.is_current(first));

        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_clones_share_counter() {
        let generation = Generation::new();
        let handle = generation.clone();
        let ticket = handle.next();

        generation.next();
        assert!(!handle.is_current(ticket));
    }

    #[test]
    fn test_invalidate_supersedes_outstanding_ticket() {
        let generation = Generation::new();
        let ticket = generation.next();
        generation.invalidate();
        assert!(!generation.is_current(ticket));
    }

    #[test]
    fn test_scoped_generation_expires_with_owner() {
        let owner = Owner::new();
        owner.set();
        let generation = Generation::scoped();
        let ticket = generation.next();
        assert!(generation.is_current(ticket));

        owner.cleanup();
        assert!(!generation.is_current(ticket));
    }

    #[test]
    fn test_scoped_ticket_skips_continuation_after_unmount() {
        let owner = Owner::new();
        owner.set();
        let saves = Generation::scoped();
        let runs = Arc::new(AtomicU64::new(0));
        let on_saved = Callback::new({
            let runs = Arc::clone(&runs);
            move |_: ()| {
                runs.fetch_add(1, Ordering::SeqCst);
            }
        });

        let ticket = saves.next();
        owner.cleanup();
        // What an async save does once its request resolves
        if saves.is_current(ticket) {
            on_saved.run(());
        }
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_debounced_starts_with_initial_value() {
        let owner = Owner::new();
        owner.set();
        let debounced = Debounced::new("lamp".to_string());
        assert_eq!(debounced.read_only().get_untracked(), "lamp");
    }

    #[test]
    fn test_settle_publishes_latest_value() {
        let owner = Owner::new();
        owner.set();
        let debounced = Debounced::new(String::new());

        let ticket = debounced.schedule();
        assert!(debounced.settle(ticket, "desk".to_string()));
        assert_eq!(debounced.read_only().get_untracked(), "desk");
    }

    #[test]
    fn test_settle_skips_equal_value() {
        let owner = Owner::new();
        owner.set();
        let debounced = Debounced::new(10u32);

        let ticket = debounced.schedule();
        assert!(!debounced.settle(ticket, 10));
        assert_eq!(debounced.read_only().get_untracked(), 10);
    }

    #[test]
    fn test_newer_change_cancels_pending_timer() {
        let owner = Owner::new();
        owner.set();
        let debounced = Debounced::new(String::new());

        let first = debounced.schedule();
        let second = debounced.schedule();
        assert!(!debounced.settle(first, "de".to_string()));
        assert_eq!(debounced.read_only().get_untracked(), "");

        assert!(debounced.settle(second, "desk".to_string()));
        assert_eq!(debounced.read_only().get_untracked(), "desk");
    }

    #[test]
    fn test_timer_after_unmount_is_ignored() {
        let owner = Owner::new();
        owner.set();
        let debounced = Debounced::new(String::new());
        let output = debounced.read_only();
        let ticket = debounced.schedule();

        owner.cleanup();
        assert!(!debounced.settle(ticket, "desk".to_string()));
        assert_eq!(output.try_get_untracked(), None);
    }
}
