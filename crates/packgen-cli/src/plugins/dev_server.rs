//! webpack-dev-server with a configurable port

use anyhow::Context;
use packgen_core::{AnswerMap, CallbackContext, Choice, Plugin, PluginApi, PromptSpec};

pub struct DevServerPlugin {
    default_port: u16,
}

impl Default for DevServerPlugin {
    fn default() -> Self {
        Self { default_port: 8080 }
    }
}

fn configure(default_port: u16, answers: &AnswerMap, ctx: &mut CallbackContext<'_>) -> anyhow::Result<()> {
    if !answers.has_module("dev-server") {
        return Ok(());
    }

    let port = match answers.get_str("port").map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<u16>()
            .with_context(|| format!("Invalid dev server port: {}", raw))?,
        _ => default_port,
    };

    ctx.config()
        .set("devServer.port", port)
        .set("devServer.hot", true)
        .set("devServer.historyApiFallback", true);
    ctx.manifest()
        .script("dev", "webpack serve")
        .dev_dependency("webpack-dev-server", "^5.0.4");
    Ok(())
}

impl Plugin for DevServerPlugin {
    fn id(&self) -> &str {
        "dev-server"
    }

    fn apply(&self, api: &mut PluginApi<'_>) -> anyhow::Result<()> {
        let default_port = self.default_port;
        api.add_module_prompt(Choice::new("dev-server", "Dev server").checked())
            .add_preset_prompt(
                PromptSpec::input("port", "Dev server port").with_default(default_port.to_string()),
            )
            .on_answers(move |answers, ctx| configure(default_port, answers, ctx));
        Ok(())
    }
}
