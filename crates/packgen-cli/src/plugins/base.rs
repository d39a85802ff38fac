//! Mode, entry/output, webpack itself, and the build script

use packgen_core::{plugin as fn_plugin, Choice, Plugin, PromptSpec};

pub const DEFAULT_ENTRY: &str = "./src/index.js";

pub fn plugin() -> Box<dyn Plugin> {
    fn_plugin("base", |api| {
        api.add_preset_prompt(
            PromptSpec::select(
                "mode",
                "Build mode",
                vec![
                    Choice::new("development", "Development"),
                    Choice::new("production", "Production"),
                ],
            )
            .with_default("development"),
        )
        .add_preset_prompt(PromptSpec::input("entry", "Entry file").with_default(DEFAULT_ENTRY));

        api.config()
            .require_module("path", "path")
            .set("output.filename", "[name].[contenthash].js")
            .set_raw("output.path", "path.resolve(__dirname, 'dist')")
            .set("output.clean", true);

        api.manifest()
            .script("build", "webpack")
            .dev_dependency("webpack", "^5.91.0")
            .dev_dependency("webpack-cli", "^5.1.4");

        api.on_answers(|answers, ctx| {
            if let Some(mode) = answers.get_str("mode") {
                ctx.config().mode(mode);
            }
            let entry = answers
                .get_str("entry")
                .filter(|e| !e.trim().is_empty())
                .unwrap_or(DEFAULT_ENTRY);
            ctx.config().entry("main", entry);
            Ok(())
        });
        Ok(())
    })
}
