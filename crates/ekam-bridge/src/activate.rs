//! Activation entry point invoked by the host.

use camino::Utf8PathBuf;
use ekam_bridge_client::{DocumentSelector, ExecutableSpec, SessionDescriptor};
use ekam_bridge_config::BridgeConfig;
use tracing::info;

use crate::host::ExtensionContext;
use crate::launcher::{ProcessLauncher, SessionLauncher};

/// Tracing target for activation events.
const ACTIVATION_TARGET: &str = "ekam_bridge::activate";

/// Activates the bridge against the host-provided context.
///
/// Reads the `ekam` settings section, describes the session, starts the
/// client, and registers the session's disposal with the context. The call
/// never fails: a missing or invalid executable path only surfaces once the
/// background start attempts to spawn the process, and is reported through
/// the client's logging rather than here.
pub fn activate(context: &mut ExtensionContext) {
    activate_with_launcher(context, &ProcessLauncher);
}

/// Activation with an explicit launcher, the seam used by tests.
pub fn activate_with_launcher(context: &mut ExtensionContext, launcher: &dyn SessionLauncher) {
    let BridgeConfig {
        path,
        arguments,
        sync_file_events,
    } = BridgeConfig::from_store(context.settings());

    let executable = ExecutableSpec::new(
        path.map(Utf8PathBuf::into_std_path_buf).unwrap_or_default(),
        arguments,
    );
    let descriptor = SessionDescriptor::new(executable, DocumentSelector::file_documents())
        .with_sync_file_events(sync_file_events);

    let session = launcher.launch(descriptor);
    context.push(session);

    info!(target: ACTIVATION_TARGET, "ekam language server bridge activated");
}
