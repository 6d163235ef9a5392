//! Immutable description of a client/server session.

use crate::executable::ExecutableSpec;
use crate::selector::DocumentSelector;

/// Pairs an executable invocation with the documents the session covers.
///
/// Created once per activation; the descriptor never changes after the
/// session has been started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    executable: ExecutableSpec,
    selector: DocumentSelector,
    sync_file_events: bool,
}

impl SessionDescriptor {
    /// Builds a descriptor; file-event forwarding defaults to enabled.
    #[must_use]
    pub fn new(executable: ExecutableSpec, selector: DocumentSelector) -> Self {
        Self {
            executable,
            selector,
            sync_file_events: true,
        }
    }

    /// Sets whether local file-change notifications are forwarded.
    #[must_use]
    pub fn with_sync_file_events(mut self, enabled: bool) -> Self {
        self.sync_file_events = enabled;
        self
    }

    /// The executable invocation for the server process.
    #[must_use]
    pub fn executable(&self) -> &ExecutableSpec {
        &self.executable
    }

    /// The documents this session covers.
    #[must_use]
    pub fn selector(&self) -> &DocumentSelector {
        &self.selector
    }

    /// Whether local file-change notifications are forwarded.
    #[must_use]
    pub fn sync_file_events(&self) -> bool {
        self.sync_file_events
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn file_event_sync_defaults_to_enabled() {
        let descriptor = SessionDescriptor::new(
            ExecutableSpec::new("/usr/bin/ekam-ls", Vec::new()),
            DocumentSelector::file_documents(),
        );

        assert!(descriptor.sync_file_events());
    }

    #[rstest]
    fn sync_flag_can_be_disabled() {
        let descriptor = SessionDescriptor::new(
            ExecutableSpec::default(),
            DocumentSelector::file_documents(),
        )
        .with_sync_file_events(false);

        assert!(!descriptor.sync_file_events());
    }
}
