//! Preset trait for CLI binaries
//!
//! A preset bundles what a binary ships on top of the engine: its identity,
//! built-in plugins, and post-create instructions.

use crate::manifest::Manifest;
use crate::plugin::{load_plugin_dir, Plugin};
use crate::runtime::PackageManager;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration trait for generator binaries
pub trait Preset {
    /// Internal name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable naming a directory of YAML plugins
    fn plugin_dir_env(&self) -> &'static str;

    /// Plugins compiled into the binary, in install order
    fn builtin_plugins(&self) -> Vec<Box<dyn Plugin>>;

    /// Instructions shown once the files are written
    fn next_steps(&self, dir: &Path, manifest: &Manifest, pm: PackageManager) -> Vec<String>;
}

/// The explicit plugin directory, else the one named by the preset's env var
pub fn plugin_dir<P: Preset + ?Sized>(preset: &P, explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(preset.plugin_dir_env()).map(PathBuf::from))
}

/// Built-in plugins (unless excluded) followed by the plugins found in `dir`
pub fn resolve_plugins<P: Preset + ?Sized>(
    preset: &P,
    dir: Option<&Path>,
    include_builtin: bool,
) -> Result<Vec<Box<dyn Plugin>>> {
    let mut plugins = if include_builtin {
        preset.builtin_plugins()
    } else {
        Vec::new()
    };

    if let Some(dir) = dir {
        let loaded = load_plugin_dir(dir)?;
        debug!(dir = %dir.display(), count = loaded.len(), "loaded declarative plugins");
        plugins.extend(loaded.into_iter().map(|p| Box::new(p) as Box<dyn Plugin>));
    }
    Ok(plugins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::plugin;

    struct TestPreset;

    impl Preset for TestPreset {
        fn name(&self) -> &'static str {
            "test"
        }

        fn display_name(&self) -> &'static str {
            "Test"
        }

        fn plugin_dir_env(&self) -> &'static str {
            "PACKGEN_TEST_PLUGIN_DIR_UNSET"
        }

        fn builtin_plugins(&self) -> Vec<Box<dyn Plugin>> {
            vec![plugin("builtin", |_| Ok(()))]
        }

        fn next_steps(&self, _dir: &Path, _manifest: &Manifest, _pm: PackageManager) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_builtins_come_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("extra.yaml"), "id: extra\n").unwrap();

        let plugins = resolve_plugins(&TestPreset, Some(dir.path()), true).unwrap();
        let ids: Vec<&str> = plugins.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["builtin", "extra"]);

        let plugins = resolve_plugins(&TestPreset, Some(dir.path()), false).unwrap();
        assert_eq!(plugins.len(), 1);
    }

    #[test]
    fn test_plugin_dir_prefers_explicit() {
        let explicit = Path::new("/tmp/plugins");
        assert_eq!(
            plugin_dir(&TestPreset, Some(explicit)),
            Some(PathBuf::from("/tmp/plugins"))
        );
        assert_eq!(plugin_dir(&TestPreset, None), None);
    }
}
