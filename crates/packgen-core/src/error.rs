//! Error taxonomy for a generator session

use crate::generator::GeneratorState;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`Generator`](crate::Generator) construction and `create()`
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A plugin's `apply` failed; remaining plugins were not installed
    #[error("plugin `{plugin}` failed to install")]
    PluginInstall {
        plugin: String,
        #[source]
        source: anyhow::Error,
    },

    /// The prompt capability failed or was aborted before any answer was used
    #[error("interactive prompt failed")]
    Prompt(#[source] anyhow::Error),

    /// The prompt capability returned without answering every prompt
    #[error("prompt `{0}` received no answer")]
    MissingAnswer(String),

    /// A registered callback failed; later callbacks did not run
    #[error("callback registered by plugin `{plugin}` failed")]
    Callback {
        plugin: String,
        #[source]
        source: anyhow::Error,
    },

    /// The manifest could not be serialized
    #[error("failed to render package manifest")]
    Render(#[from] serde_json::Error),

    /// Writing an output file failed
    #[error("failed to write {}", path.display())]
    Emission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `create()` was called on a generator that is not ready for it
    #[error("cannot create from state `{0}`; a generator runs a single session")]
    InvalidState(GeneratorState),
}

impl GeneratorError {
    /// Id of the plugin the failure is attributed to, if any
    pub fn plugin(&self) -> Option<&str> {
        match self {
            GeneratorError::PluginInstall { plugin, .. } | GeneratorError::Callback { plugin, .. } => {
                Some(plugin)
            }
            _ => None,
        }
    }
}
