//! Built-in webpack plugins shipped with the `packgen` binary
//!
//! `base` always applies; the others offer themselves in the module
//! checkbox and only act when selected.

mod babel;
mod base;
mod css;
mod dev_server;
mod html;
mod typescript;

use packgen_core::Plugin;

/// Built-in plugins in install order
pub fn builtin() -> Vec<Box<dyn Plugin>> {
    vec![
        base::plugin(),
        typescript::plugin(),
        babel::plugin(),
        css::plugin(),
        html::plugin(),
        Box::new(dev_server::DevServerPlugin::default()),
    ]
}
