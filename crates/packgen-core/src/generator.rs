//! The generator: installs plugins, runs one prompt session, emits files

use crate::callbacks::CallbackRegistry;
use crate::config::ConfigBuilder;
use crate::emit::{self, CONFIG_FILE, MANIFEST_FILE};
use crate::error::GeneratorError;
use crate::manifest::Manifest;
use crate::plugin::{loader, Plugin};
use crate::prompt::{AnswerMap, PromptCollector, PromptSpec, Prompter};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Lifecycle of a generator. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Installed,
    Prompting,
    Resolving,
    Emitting,
    Done,
    Failed,
}

impl fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorState::Idle => "idle",
            GeneratorState::Installed => "installed",
            GeneratorState::Prompting => "prompting",
            GeneratorState::Resolving => "resolving",
            GeneratorState::Emitting => "emitting",
            GeneratorState::Done => "done",
            GeneratorState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Notifications broadcast to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorEvent {
    /// Both files were written; sent once per successful `create()`
    AfterCreate,
}

/// Everything a generator needs besides its working directory
pub struct GeneratorOptions {
    pub plugins: Vec<Box<dyn Plugin>>,
    pub manifest: Manifest,
}

/// Result of a successful `create()`
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub config_path: PathBuf,
    pub manifest_path: PathBuf,
    pub answers: AnswerMap,
}

/// State shared with plugins through [`PluginApi`](crate::PluginApi)
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub(crate) prompts: PromptCollector,
    pub(crate) callbacks: CallbackRegistry,
    pub(crate) config: ConfigBuilder,
    pub(crate) manifest: Manifest,
}

/// One scaffolding session over a fixed plugin list
pub struct Generator {
    context: PathBuf,
    plugin_ids: Vec<String>,
    session: Session,
    state: GeneratorState,
    events: broadcast::Sender<GeneratorEvent>,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("context", &self.context)
            .field("plugins", &self.plugin_ids)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Create a generator and install every plugin, in order.
    ///
    /// Fails with [`GeneratorError::PluginInstall`] as soon as one plugin's
    /// `apply` fails; plugins after it are not installed.
    pub fn new(
        context: impl Into<PathBuf>,
        options: GeneratorOptions,
    ) -> Result<Self, GeneratorError> {
        let GeneratorOptions { plugins, manifest } = options;
        let (events, _) = broadcast::channel(4);

        let mut generator = Self {
            context: context.into(),
            plugin_ids: plugins.iter().map(|p| p.id().to_string()).collect(),
            session: Session {
                manifest,
                ..Session::default()
            },
            state: GeneratorState::Idle,
            events,
        };

        loader::install_plugins(&plugins, &generator.plugin_ids, &mut generator.session)?;
        generator.transition(GeneratorState::Installed);
        debug!(
            plugins = generator.plugin_ids.len(),
            presets = generator.session.prompts.preset_count(),
            modules = generator.session.prompts.module_count(),
            callbacks = generator.session.callbacks.len(),
            "plugins installed"
        );
        Ok(generator)
    }

    pub fn context(&self) -> &Path {
        &self.context
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugin_ids.iter().any(|p| p == id)
    }

    pub fn plugin_ids(&self) -> &[String] {
        &self.plugin_ids
    }

    pub fn config(&self) -> &ConfigBuilder {
        &self.session.config
    }

    pub fn manifest(&self) -> &Manifest {
        &self.session.manifest
    }

    /// The prompt list `create()` would present
    pub fn prompts(&self) -> Vec<PromptSpec> {
        self.session.prompts.build()
    }

    pub fn config_path(&self) -> PathBuf {
        self.context.join(CONFIG_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.context.join(MANIFEST_FILE)
    }

    /// Receive [`GeneratorEvent`]s. Only events sent after subscribing are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<GeneratorEvent> {
        self.events.subscribe()
    }

    /// Run the session: prompt, apply callbacks, write both files.
    ///
    /// A prompt failure leaves the generator `Installed`, so `create()` may be
    /// retried. Any later failure leaves it `Failed`; files written before
    /// the failure stay on disk.
    pub async fn create<P>(&mut self, prompter: &mut P) -> Result<CreateOutcome, GeneratorError>
    where
        P: Prompter + ?Sized,
    {
        if self.state != GeneratorState::Installed {
            return Err(GeneratorError::InvalidState(self.state));
        }

        self.transition(GeneratorState::Prompting);
        let prompts = self.session.prompts.build();
        let answers = match Self::ask(prompter, &prompts).await {
            Ok(answers) => answers,
            Err(err) => {
                self.transition(GeneratorState::Installed);
                return Err(err);
            }
        };

        match self.resolve_and_emit(answers).await {
            Ok(outcome) => {
                self.transition(GeneratorState::Done);
                // No subscribers is fine
                let _ = self.events.send(GeneratorEvent::AfterCreate);
                Ok(outcome)
            }
            Err(err) => {
                self.transition(GeneratorState::Failed);
                Err(err)
            }
        }
    }

    async fn ask<P>(
        prompter: &mut P,
        prompts: &[PromptSpec],
    ) -> Result<AnswerMap, GeneratorError>
    where
        P: Prompter + ?Sized,
    {
        let answers = prompter.prompt(prompts).await.map_err(GeneratorError::Prompt)?;
        answers.ensure_complete(prompts)?;
        Ok(answers)
    }

    async fn resolve_and_emit(
        &mut self,
        answers: AnswerMap,
    ) -> Result<CreateOutcome, GeneratorError> {
        self.transition(GeneratorState::Resolving);
        let Session {
            callbacks,
            config,
            manifest,
            ..
        } = &mut self.session;
        callbacks.run_all(&answers, &self.plugin_ids, config, manifest)?;

        self.transition(GeneratorState::Emitting);
        let source = self.session.config.serialize();
        let manifest = self.session.manifest.to_pretty_json()?;

        let config_path = self.config_path();
        emit::write_file(&config_path, &source).await?;
        info!(path = %config_path.display(), "wrote build configuration");

        let manifest_path = self.manifest_path();
        emit::write_file(&manifest_path, &manifest).await?;
        info!(path = %manifest_path.display(), "wrote package manifest");

        Ok(CreateOutcome {
            config_path,
            manifest_path,
            answers,
        })
    }

    fn transition(&mut self, next: GeneratorState) {
        debug!(from = %self.state, to = %next, "generator state");
        self.state = next;
    }
}
