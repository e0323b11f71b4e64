//! Change notifications from the interaction state to the view.
//!
//! Subscribers receive a `Change` over a channel each time a controller
//! mutates something the view renders. Dropped receivers are pruned on the
//! next emit.

use crate::state::{CarouselSnapshot, ElementId, MenuSnapshot, ScrollSnapshot};
use std::sync::mpsc;

/// Specifying what changed.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Carousel(CarouselSnapshot),
    Menu(MenuSnapshot),
    Scroll(ScrollSnapshot),
    Reveal(ElementId),
    Layout,
    Log,
}

pub type ChangeReceiver = mpsc::Receiver<Change>;

/// Fan-out of changes to every live subscriber.
///
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<mpsc::Sender<Change>>,
}

impl Notifier {
    pub fn new() -> Self {
        Notifier::default()
    }

    /// Register a new subscriber.
    ///
    pub fn subscribe(&mut self) -> ChangeReceiver {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send a change to every subscriber, forgetting the ones that hung up.
    ///
    pub fn emit(&mut self, change: Change) {
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_changes() {
        let mut notifier = Notifier::new();
        let first = notifier.subscribe();
        let second = notifier.subscribe();

        notifier.emit(Change::Layout);

        assert_eq!(first.try_recv().ok(), Some(Change::Layout));
        assert_eq!(second.try_recv().ok(), Some(Change::Layout));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut notifier = Notifier::new();
        let kept = notifier.subscribe();
        drop(notifier.subscribe());

        notifier.emit(Change::Log);

        assert_eq!(notifier.subscriber_count(), 1);
        assert_eq!(kept.try_iter().count(), 1);
    }
}
