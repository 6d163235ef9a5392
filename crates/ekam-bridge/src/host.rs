//! Contract consumed from the host's extension runtime.

use ekam_bridge_config::SettingsStore;

/// A resource released when the owning extension scope ends.
pub trait Disposable: Send {
    /// Releases the resource. Implementations must tolerate repeat calls.
    fn dispose(&mut self);
}

/// Lifecycle context the host hands to the activation entry point.
///
/// Owns the read-only settings snapshot and the subscription list. Every
/// registered subscription is disposed exactly once when the context is
/// disposed, explicitly via [`ExtensionContext::dispose_all`] or implicitly
/// when the context is dropped, whichever comes first.
pub struct ExtensionContext {
    settings: SettingsStore,
    subscriptions: Vec<Box<dyn Disposable>>,
}

impl ExtensionContext {
    /// Builds a context over the host's settings snapshot.
    #[must_use]
    pub fn new(settings: SettingsStore) -> Self {
        Self {
            settings,
            subscriptions: Vec::new(),
        }
    }

    /// The host's settings snapshot.
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Registers a resource to release when the extension deactivates.
    pub fn push(&mut self, subscription: Box<dyn Disposable>) {
        self.subscriptions.push(subscription);
    }

    /// Number of currently registered subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Disposes every registered subscription exactly once.
    pub fn dispose_all(&mut self) {
        for mut subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }
}

impl Drop for ExtensionContext {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl std::fmt::Debug for ExtensionContext {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ExtensionContext")
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rstest::rstest;

    use super::*;

    struct CountingDisposable {
        disposals: Arc<AtomicUsize>,
    }

    impl Disposable for CountingDisposable {
        fn dispose(&mut self) {
            self.disposals.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counted(context: &mut ExtensionContext) -> Arc<AtomicUsize> {
        let disposals = Arc::new(AtomicUsize::new(0));
        context.push(Box::new(CountingDisposable {
            disposals: Arc::clone(&disposals),
        }));
        disposals
    }

    #[rstest]
    fn dispose_all_runs_each_subscription_once() {
        let mut context = ExtensionContext::new(SettingsStore::new());
        let first = counted(&mut context);
        let second = counted(&mut context);

        context.dispose_all();
        context.dispose_all();

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(context.subscription_count(), 0);
    }

    #[rstest]
    fn dropping_the_context_disposes_subscriptions() {
        let mut context = ExtensionContext::new(SettingsStore::new());
        let disposals = counted(&mut context);

        drop(context);

        assert_eq!(disposals.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn explicit_disposal_is_not_repeated_on_drop() {
        let mut context = ExtensionContext::new(SettingsStore::new());
        let disposals = counted(&mut context);

        context.dispose_all();
        drop(context);

        assert_eq!(disposals.load(Ordering::SeqCst), 1);
    }
}
