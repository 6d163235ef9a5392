//! Executable invocation for the external language server.

use std::path::{Path, PathBuf};

/// Command and arguments used to launch the language server process.
///
/// Carried unchanged from configuration to the spawn call; an empty command
/// is legal here and only fails once the spawn is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutableSpec {
    command: PathBuf,
    args: Vec<String>,
}

impl ExecutableSpec {
    /// Builds a spec from a command path and its arguments.
    #[must_use]
    pub fn new(command: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// The executable path or command name.
    #[must_use]
    pub fn command(&self) -> &Path {
        self.command.as_path()
    }

    /// Arguments passed to the executable, in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        self.args.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn preserves_command_and_argument_order() {
        let spec = ExecutableSpec::new(
            "/usr/bin/ekam-ls",
            vec!["--foo".to_string(), "--bar".to_string()],
        );

        assert_eq!(spec.command(), Path::new("/usr/bin/ekam-ls"));
        assert_eq!(spec.args(), ["--foo", "--bar"]);
    }

    #[rstest]
    fn default_spec_has_empty_command() {
        let spec = ExecutableSpec::default();

        assert_eq!(spec.command(), Path::new(""));
        assert!(spec.args().is_empty());
    }
}
