//! Schema for the `ekam` settings section.

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::settings::SettingsStore;

/// Namespace the bridge reads its settings from.
pub const BRIDGE_NAMESPACE: &str = "ekam";

/// Tracing target for configuration handling.
const CONFIG_TARGET: &str = "ekam_bridge_config::bridge";

/// Settings controlling how the language server is launched.
///
/// Field names follow the host's camelCase convention on the wire. Every
/// field is optional in the section; a missing `path` stays unset and only
/// fails once the client actually tries to spawn the executable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Filesystem location of the language server executable. No default.
    pub path: Option<Utf8PathBuf>,
    /// Arguments passed to the executable, in order.
    pub arguments: Vec<String>,
    /// Whether local file-change notifications are forwarded to the server.
    pub sync_file_events: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            path: None,
            arguments: Vec::new(),
            sync_file_events: true,
        }
    }
}

impl BridgeConfig {
    /// Reads the bridge settings from the [`BRIDGE_NAMESPACE`] section.
    ///
    /// A missing section yields the defaults. A section that fails to
    /// deserialize is logged and degrades to the defaults as well; the bridge
    /// performs no further validation of its own.
    #[must_use]
    pub fn from_store(store: &SettingsStore) -> Self {
        let Some(section) = store.section(BRIDGE_NAMESPACE) else {
            return Self::default();
        };

        serde_json::from_value(section.clone()).unwrap_or_else(|error| {
            tracing::warn!(
                target: CONFIG_TARGET,
                namespace = BRIDGE_NAMESPACE,
                %error,
                "settings section is malformed, falling back to defaults"
            );
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8Path;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn missing_section_yields_defaults() {
        let store = SettingsStore::new();

        let config = BridgeConfig::from_store(&store);

        assert_eq!(config, BridgeConfig::default());
        assert!(config.path.is_none());
        assert!(config.arguments.is_empty());
        assert!(config.sync_file_events);
    }

    #[rstest]
    fn full_section_parses_every_field() {
        let store = SettingsStore::from_sections([(
            BRIDGE_NAMESPACE,
            json!({
                "path": "/usr/bin/ekam-ls",
                "arguments": ["--foo"],
                "syncFileEvents": false,
            }),
        )]);

        let config = BridgeConfig::from_store(&store);

        assert_eq!(config.path.as_deref(), Some(Utf8Path::new("/usr/bin/ekam-ls")));
        assert_eq!(config.arguments, vec!["--foo"]);
        assert!(!config.sync_file_events);
    }

    #[rstest]
    fn absent_arguments_default_to_empty() {
        let store = SettingsStore::from_sections([(
            BRIDGE_NAMESPACE,
            json!({"path": "/usr/bin/ekam-ls"}),
        )]);

        let config = BridgeConfig::from_store(&store);

        assert!(config.arguments.is_empty());
    }

    #[rstest]
    fn absent_sync_flag_defaults_to_true() {
        let store = SettingsStore::from_sections([(
            BRIDGE_NAMESPACE,
            json!({"path": "/usr/bin/ekam-ls"}),
        )]);

        let config = BridgeConfig::from_store(&store);

        assert!(config.sync_file_events);
    }

    #[rstest]
    fn sync_flag_uses_camel_case_key() {
        let store = SettingsStore::from_sections([(
            BRIDGE_NAMESPACE,
            json!({"sync_file_events": false}),
        )]);

        // Only the camelCase spelling is recognised; the snake_case key is a
        // foreign field and the flag keeps its default.
        let config = BridgeConfig::from_store(&store);

        assert!(config.sync_file_events);
    }

    #[rstest]
    fn malformed_section_degrades_to_defaults() {
        let store =
            SettingsStore::from_sections([(BRIDGE_NAMESPACE, json!({"arguments": "--foo"}))]);

        let config = BridgeConfig::from_store(&store);

        assert_eq!(config, BridgeConfig::default());
    }

    #[rstest]
    fn foreign_namespace_is_ignored() {
        let store = SettingsStore::from_sections([(
            "editor",
            json!({"path": "/usr/bin/other-ls", "syncFileEvents": false}),
        )]);

        let config = BridgeConfig::from_store(&store);

        assert_eq!(config, BridgeConfig::default());
    }

    #[rstest]
    fn empty_string_path_is_preserved_not_rejected() {
        let store = SettingsStore::from_sections([(BRIDGE_NAMESPACE, json!({"path": ""}))]);

        let config = BridgeConfig::from_store(&store);

        assert_eq!(config.path.as_deref(), Some(Utf8Path::new("")));
    }
}
