//! TypeScript through ts-loader

use super::base::DEFAULT_ENTRY;
use packgen_core::{plugin as fn_plugin, Choice, Plugin};

pub fn plugin() -> Box<dyn Plugin> {
    fn_plugin("typescript", |api| {
        api.add_module_prompt(Choice::new("typescript", "TypeScript"));

        api.on_answers(|answers, ctx| {
            if !answers.has_module("typescript") {
                return Ok(());
            }

            ctx.config()
                .resolve_extension(".ts")
                .resolve_extension(".tsx")
                .resolve_extension(".js")
                .rule("ts")
                .test(r"\.tsx?$")
                .exclude("node_modules")
                .loader("ts-loader", None);

            // Only the untouched default entry is renamed
            if answers.get_str("entry").unwrap_or(DEFAULT_ENTRY) == DEFAULT_ENTRY {
                ctx.config().replace_entry("main", "./src/index.ts");
            }

            ctx.manifest()
                .dev_dependency("typescript", "^5.4.5")
                .dev_dependency("ts-loader", "^9.5.1");
            Ok(())
        });
        Ok(())
    })
}
