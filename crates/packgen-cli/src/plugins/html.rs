//! index.html generation through html-webpack-plugin

use packgen_core::{plugin as fn_plugin, Choice, Plugin, WebpackPlugin};
use serde_json::json;

pub fn plugin() -> Box<dyn Plugin> {
    fn_plugin("html", |api| {
        api.add_module_prompt(Choice::new("html", "HTML page").checked());

        api.on_answers(|answers, ctx| {
            if !answers.has_module("html") {
                return Ok(());
            }

            let title = ctx.manifest().name().unwrap_or("App").to_string();
            ctx.config().add_plugin(
                WebpackPlugin::new("html", "HtmlWebpackPlugin", "html-webpack-plugin")
                    .arg(json!({ "title": title })),
            );
            ctx.manifest()
                .dev_dependency("html-webpack-plugin", "^5.6.0");
            Ok(())
        });
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::generate;

    #[tokio::test]
    async fn test_html_plugin() {
        let (config, manifest) = generate(&["html"]).await;

        assert!(config.contains("const HtmlWebpackPlugin = require('html-webpack-plugin');\n"));
        assert!(config.contains("new HtmlWebpackPlugin({\n"));
        assert!(config.contains("title: 'demo',"));
        assert_eq!(manifest["devDependencies"]["html-webpack-plugin"], "^5.6.0");
    }
}
