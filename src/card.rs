use crate::browser::Component;
use log::trace;
use std::cell::Cell;
use std::rc::Rc;

/// Page-wide scroll lock, held while at least one guard is alive
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.set(self.holders.get() + 1);
        ScrollLockGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }
}

/// Releases its share of the lock on drop
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}

/// Modal showing a card's full recipe
#[derive(Debug, Default)]
pub struct CardDisclosure {
    lock: Option<ScrollLock>,
    guard: Option<ScrollLockGuard>,
}

impl CardDisclosure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the modal and locks page scrolling. Opening an open modal or
    /// a detached one does nothing.
    pub fn open(&mut self) {
        if self.guard.is_some() {
            return;
        }
        if let Some(lock) = &self.lock {
            trace!("Opening recipe dialog");
            self.guard = Some(lock.acquire());
        }
    }

    pub fn close(&mut self) {
        if self.guard.take().is_some() {
            trace!("Closed recipe dialog");
        }
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }
}

impl Component for CardDisclosure {
    type Host = ScrollLock;

    fn attach(&mut self, lock: &ScrollLock) {
        self.close();
        self.lock = Some(lock.clone());
    }

    fn detach(&mut self) {
        self.close();
        self.lock = None;
    }

    fn is_attached(&self) -> bool {
        self.lock.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close() {
        let lock = ScrollLock::new();
        let mut card = CardDisclosure::new();
        card.attach(&lock);

        card.open();
        assert!(card.is_open());
        assert!(lock.is_locked());

        card.close();
        assert!(!card.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_overlapping_modals() {
        let lock = ScrollLock::new();
        let mut first = CardDisclosure::new();
        let mut second = CardDisclosure::new();
        first.attach(&lock);
        second.attach(&lock);

        first.open();
        second.open();
        first.close();
        assert!(lock.is_locked());

        second.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_double_open_holds_one_share() {
        let lock = ScrollLock::new();
        let mut card = CardDisclosure::new();
        card.attach(&lock);

        card.open();
        card.open();
        card.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_detach_and_drop_release() {
        let lock = ScrollLock::new();
        let mut card = CardDisclosure::new();
        card.attach(&lock);
        card.open();
        card.detach();
        assert!(!lock.is_locked());

        card.open();
        assert!(!card.is_open());

        {
            let mut dropped = CardDisclosure::new();
            dropped.attach(&lock);
            dropped.open();
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }
}
