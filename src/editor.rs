//! Opening content files in the user's editor or the desktop opener.

use std::{env, path::Path, process::Command};

use crate::{
    config::Config,
    error::{Error, Result},
};

/// How content files are opened, resolved once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    /// Terminal editor command, possibly with arguments (`code -w`).
    pub editor_command: Option<String>,
    /// Prefer the desktop opener over the editor.
    pub use_gui: bool,
}

impl EditorConfig {
    /// Resolve from the user config, then `$EDITOR`, then `$VISUAL`.
    pub(crate) fn resolve(config: &Config, gui_flag: bool) -> Self {
        let editor_command = config
            .editor()
            .map(str::to_string)
            .or_else(|| env_command("EDITOR"))
            .or_else(|| env_command("VISUAL"));
        Self {
            editor_command,
            use_gui: gui_flag || config.gui(),
        }
    }
}

/// Read a non-empty command from an environment variable.
fn env_command(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A resolved way of opening a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// Spawn a terminal editor and wait for it.
    Editor {
        /// Program to run.
        program: String,
        /// Arguments placed before the file path.
        args: Vec<String>,
    },
    /// Hand the file to the desktop opener and return immediately.
    Opener,
}

impl Launch {
    /// Decide how to open files for `config`.
    pub(crate) fn plan(config: &EditorConfig) -> Result<Self> {
        let Some(command) = config.editor_command.as_deref() else {
            return Ok(Self::Opener);
        };
        if config.use_gui {
            return Ok(Self::Opener);
        }

        let mut words = shell_words::split(command).map_err(|error| Error::EditorParse {
            message: error.to_string(),
        })?;
        if words.is_empty() {
            return Ok(Self::Opener);
        }
        let program = words.remove(0);
        Ok(Self::Editor {
            program,
            args: words,
        })
    }
}

/// Open `path` according to `config`.
///
/// Blocks until a terminal editor exits; the desktop opener detaches.
pub fn open_file(config: &EditorConfig, path: &Path) -> Result<()> {
    match Launch::plan(config)? {
        Launch::Editor { program, args } => {
            let status = Command::new(&program)
                .args(&args)
                .arg(path)
                .status()
                .map_err(|error| Error::EditorSpawn {
                    editor: program.clone(),
                    source: error,
                })?;
            if !status.success() {
                return Err(Error::EditorStatus {
                    editor: program,
                    status,
                });
            }
            Ok(())
        }
        Launch::Opener => open::that_detached(path).map_err(|error| Error::OpenFailed {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorConfig, Launch};

    fn config(editor: Option<&str>, use_gui: bool) -> EditorConfig {
        EditorConfig {
            editor_command: editor.map(str::to_string),
            use_gui,
        }
    }

    #[test]
    fn splits_editor_arguments() {
        let launch = Launch::plan(&config(Some("code --wait -n"), false)).expect("plan");
        assert_eq!(
            launch,
            Launch::Editor {
                program: "code".into(),
                args: vec!["--wait".into(), "-n".into()],
            }
        );
    }

    #[test]
    fn gui_or_missing_editor_uses_opener() {
        assert_eq!(Launch::plan(&config(None, false)).expect("plan"), Launch::Opener);
        assert_eq!(Launch::plan(&config(Some("vim"), true)).expect("plan"), Launch::Opener);
    }

    #[test]
    fn rejects_unbalanced_quotes() {
        assert!(Launch::plan(&config(Some("vim \"unterminated"), false)).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn reports_editor_exit_status() {
        use std::path::Path;

        use crate::{editor::open_file, error::Error};

        let path = Path::new("/dev/null");
        assert!(open_file(&config(Some("true"), false), path).is_ok());
        let error = open_file(&config(Some("false"), false), path).expect_err("should fail");
        assert!(matches!(error, Error::EditorStatus { .. }));
    }
}
