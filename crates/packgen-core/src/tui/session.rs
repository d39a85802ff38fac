//! Interactive create flow: directory, plugins, prompts, files, next steps

use super::prompter::ClackPrompter;
use crate::emit::{CONFIG_FILE, MANIFEST_FILE};
use crate::generator::{Generator, GeneratorEvent, GeneratorOptions};
use crate::manifest::Manifest;
use crate::preset::{self, Preset};
use crate::prompt::DefaultPrompter;
use crate::runtime;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to generate into
    pub directory: Option<PathBuf>,

    /// Package name written to the manifest
    pub name: Option<String>,

    /// Existing manifest to start from
    pub manifest: Option<PathBuf>,

    /// Directory of YAML plugins to load after the built-in ones
    pub plugin_dir: Option<PathBuf>,

    /// Skip the preset's built-in plugins
    pub no_builtin: bool,

    /// Answer every prompt with its default (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<P: Preset>(preset: &P, args: CreateArgs) -> Result<()> {
    cliclack::intro(preset.display_name())?;

    let project_dir = select_directory(&args)?;
    let source = manifest_source(&args, &project_dir);
    if let Some(path) = &source {
        cliclack::log::info(format!("Starting from {}", path.display()))?;
    }
    let manifest = seed_manifest(&args, source.as_deref(), &project_dir)?;

    let plugin_dir = preset::plugin_dir(preset, args.plugin_dir.as_deref());
    if let Some(dir) = &plugin_dir {
        cliclack::log::info(format!("Using plugins from {}", dir.display()))?;
    }
    let plugins = preset::resolve_plugins(preset, plugin_dir.as_deref(), !args.no_builtin)?;
    if plugins.is_empty() {
        cliclack::log::warning("No plugins loaded; generating empty files")?;
    }

    let mut generator = Generator::new(&project_dir, GeneratorOptions { plugins, manifest })?;
    let mut events = generator.subscribe();

    let outcome = if args.yes {
        generator.create(&mut DefaultPrompter).await?
    } else {
        generator.create(&mut ClackPrompter).await?
    };

    if let Ok(GeneratorEvent::AfterCreate) = events.try_recv() {
        cliclack::log::success(format!(
            "Wrote {} and {}",
            outcome.config_path.display(),
            outcome.manifest_path.display()
        ))?;
    }

    check_node()?;
    print_next_steps(preset, &project_dir, generator.manifest())?;

    Ok(())
}

/// The generator's working directory: `--directory`, the prompted path, or
/// the current directory. Emission creates it when missing.
fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    let requested = match &args.directory {
        Some(dir) => Some(dir.clone()),
        None if args.yes => None,
        None => {
            let input: String = cliclack::input("Project directory")
                .placeholder(".")
                .default_input(".")
                .interact()?;
            Some(PathBuf::from(input))
        }
    };
    let dir = project_dir(&cwd, requested.as_deref());
    if dir.exists() && !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }
    cliclack::log::info(format!("Generating into {}", dir.display()))?;

    let replaced = replaced_outputs(&dir);
    if !replaced.is_empty() {
        cliclack::log::warning(format!("Will overwrite {}", replaced.join(", ")))?;
        let proceed = args.yes
            || cliclack::confirm("Continue anyway?")
                .initial_value(true)
                .interact()?;
        if !proceed {
            anyhow::bail!("Setup cancelled.");
        }
    }
    Ok(dir)
}

/// Resolve a requested directory against `cwd`; empty or `.` means `cwd`
fn project_dir(cwd: &Path, requested: Option<&Path>) -> PathBuf {
    match requested {
        Some(dir) if !dir.as_os_str().is_empty() && dir != Path::new(".") => cwd.join(dir),
        _ => cwd.to_path_buf(),
    }
}

/// Output files already present in `dir`. An existing manifest is extended
/// rather than replaced, so only the build configuration counts.
fn replaced_outputs(dir: &Path) -> Vec<&'static str> {
    [CONFIG_FILE]
        .into_iter()
        .filter(|name| dir.join(name).exists())
        .collect()
}

/// `--manifest`, else an existing `package.json` in the project
fn manifest_source(args: &CreateArgs, project_dir: &Path) -> Option<PathBuf> {
    let existing = project_dir.join(MANIFEST_FILE);
    args.manifest
        .clone()
        .or_else(|| existing.is_file().then_some(existing))
}

fn seed_manifest(args: &CreateArgs, source: Option<&Path>, project_dir: &Path) -> Result<Manifest> {
    let mut manifest = match source {
        Some(path) => Manifest::from_file(path)?,
        None => Manifest::named(&package_name(project_dir)),
    };

    if let Some(name) = &args.name {
        manifest.set("name", name.as_str());
    }
    Ok(manifest)
}

/// npm-style package name derived from the directory name
fn package_name(dir: &Path) -> String {
    let raw = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let name: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let name = name.trim_matches(|c| c == '-' || c == '.' || c == '_');

    if name.is_empty() {
        "app".to_string()
    } else {
        name.to_string()
    }
}

fn check_node() -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let node = runtime::check_node();
    if node.available {
        spinner.stop(format!(
            "Detected runtimes: {} ({})",
            node.name,
            node.version.as_deref().unwrap_or("unknown")
        ));
    } else {
        spinner.stop("Missing runtimes");
        cliclack::log::warning(format!(
            "{} is not installed; it is needed to build the project",
            node.name
        ))?;
    }
    Ok(())
}

fn print_next_steps<P: Preset>(preset: &P, project_dir: &Path, manifest: &Manifest) -> Result<()> {
    let pm = runtime::detect_package_manager();
    let steps = preset.next_steps(project_dir, manifest, pm);

    if !steps.is_empty() {
        println!();
        println!("  Next steps");
        println!();

        for (i, step) in steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step);
        }
    }

    cliclack::outro("Happy coding!").context("Failed to write to terminal")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_manifest_named_after_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Demo Site");
        let args = CreateArgs::default();

        assert_eq!(manifest_source(&args, &project), None);
        let manifest = seed_manifest(&args, None, &project).unwrap();
        assert_eq!(manifest.name(), Some("demo-site"));
    }

    #[test]
    fn test_project_dir_resolution() {
        let cwd = Path::new("/work");
        assert_eq!(project_dir(cwd, None), PathBuf::from("/work"));
        assert_eq!(project_dir(cwd, Some(Path::new("."))), PathBuf::from("/work"));
        assert_eq!(project_dir(cwd, Some(Path::new(""))), PathBuf::from("/work"));
        assert_eq!(project_dir(cwd, Some(Path::new("web"))), PathBuf::from("/work/web"));
        assert_eq!(project_dir(cwd, Some(Path::new("/srv/app"))), PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_only_config_counts_as_replaced() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# demo\n").unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        assert!(replaced_outputs(dir.path()).is_empty());

        std::fs::write(dir.path().join(CONFIG_FILE), "module.exports = {};\n").unwrap();
        assert_eq!(replaced_outputs(dir.path()), vec![CONFIG_FILE]);
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name(Path::new("/tmp/My App")), "my-app");
        assert_eq!(package_name(Path::new("/tmp/web_site.v2")), "web_site.v2");
        assert_eq!(package_name(Path::new("/tmp/--x--")), "x");
        assert_eq!(package_name(Path::new("/")), "app");
    }

    #[test]
    fn test_seed_manifest_prefers_flag_then_existing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"name": "existing", "version": "2.0.0"}"#,
        )
        .unwrap();

        let args = CreateArgs::default();
        let source = manifest_source(&args, dir.path());
        assert_eq!(source, Some(dir.path().join(MANIFEST_FILE)));
        let manifest = seed_manifest(&args, source.as_deref(), dir.path()).unwrap();
        assert_eq!(manifest.name(), Some("existing"));

        let seed = dir.path().join("seed.json");
        std::fs::write(&seed, r#"{"name": "seeded"}"#).unwrap();
        let args = CreateArgs {
            manifest: Some(seed.clone()),
            name: Some("renamed".into()),
            ..CreateArgs::default()
        };
        let source = manifest_source(&args, dir.path());
        assert_eq!(source, Some(seed));
        let manifest = seed_manifest(&args, source.as_deref(), dir.path()).unwrap();
        assert_eq!(manifest.name(), Some("renamed"));
    }
}
