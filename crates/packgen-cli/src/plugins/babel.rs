//! Babel for plain JavaScript sources

use packgen_core::{plugin as fn_plugin, Choice, Plugin};
use serde_json::json;

pub fn plugin() -> Box<dyn Plugin> {
    fn_plugin("babel", |api| {
        api.add_module_prompt(Choice::new("babel", "Babel"));

        api.on_answers(|answers, ctx| {
            if !answers.has_module("babel") {
                return Ok(());
            }

            ctx.config()
                .rule("js")
                .test(r"\.m?jsx?$")
                .exclude("node_modules")
                .loader(
                    "babel-loader",
                    Some(json!({ "presets": ["@babel/preset-env"] })),
                );

            ctx.manifest()
                .dev_dependency("@babel/core", "^7.24.5")
                .dev_dependency("@babel/preset-env", "^7.24.5")
                .dev_dependency("babel-loader", "^9.1.3");
            Ok(())
        });
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::generate;

    #[tokio::test]
    async fn test_babel_selected() {
        let (config, manifest) = generate(&["babel"]).await;

        assert!(config.contains("test: /\\.m?jsx?$/,"));
        assert!(config.contains("loader: 'babel-loader',"));
        assert!(config.contains("'@babel/preset-env',"));
        assert_eq!(manifest["devDependencies"]["babel-loader"], "^9.1.3");
    }

    #[tokio::test]
    async fn test_rules_follow_install_order() {
        let (config, _) = generate(&["babel", "typescript"]).await;

        let ts = config.find("ts-loader").unwrap();
        let babel = config.find("babel-loader").unwrap();
        assert!(ts < babel);
    }
}
