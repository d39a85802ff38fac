//! Installs plugins into a generator session

use super::{Plugin, PluginApi};
use crate::error::GeneratorError;
use crate::generator::Session;
use tracing::debug;

/// Call `apply` on every plugin in list order, each with a fresh API.
/// The first failure aborts installation of the remaining plugins.
pub(crate) fn install_plugins(
    plugins: &[Box<dyn Plugin>],
    ids: &[String],
    session: &mut Session,
) -> Result<(), GeneratorError> {
    for plugin in plugins {
        let id = plugin.id();
        debug!(plugin = id, "installing plugin");

        let mut api = PluginApi::new(id, ids, &mut *session);
        plugin
            .apply(&mut api)
            .map_err(|source| GeneratorError::PluginInstall {
                plugin: id.to_string(),
                source,
            })?;
    }
    Ok(())
}
