//! Observable owner of a live document.

use std::fmt;

/// Handle returned by [`DocumentStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<D> = Box<dyn FnMut(&D) + Send>;

/// Owns the live document and notifies subscribers on every replacement.
///
/// The store never exposes partial mutation: every change goes through
/// [`set_document`](Self::set_document) or [`update`](Self::update), and
/// each applied change notifies every subscriber exactly once with the new
/// document. Persistence is wired in as one such subscriber.
pub struct DocumentStore<D> {
    document: D,
    listeners: Vec<(SubscriptionId, Listener<D>)>,
    next_id: u64,
}

impl<D: Clone> DocumentStore<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// The current document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Consumes the store, returning the current document.
    pub fn into_document(self) -> D {
        self.document
    }

    /// Replaces the whole document and notifies subscribers.
    pub fn set_document(&mut self, next: D) {
        self.document = next;
        for (_, listener) in &mut self.listeners {
            listener(&self.document);
        }
    }

    /// Applies `operation` to a copy of the document.
    ///
    /// The copy replaces the live document only when `operation` reports a
    /// change; rejected operations notify no one.
    pub fn update<F>(&mut self, operation: F) -> bool
    where
        F: FnOnce(&mut D) -> bool,
    {
        let mut next = self.document.clone();
        if !operation(&mut next) {
            return false;
        }
        self.set_document(next);
        true
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&D) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a subscriber. Returns `false` for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

impl<D: fmt::Debug> fmt::Debug for DocumentStore<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("document", &self.document)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
