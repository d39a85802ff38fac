//! Stylesheets through css-loader and style-loader

use packgen_core::{plugin as fn_plugin, Choice, Plugin, PromptSpec};
use serde_json::json;

pub fn plugin() -> Box<dyn Plugin> {
    fn_plugin("css", |api| {
        api.add_module_prompt(Choice::new("css", "CSS"))
            .add_preset_prompt(PromptSpec::confirm(
                "css_modules",
                "Enable CSS modules?",
                false,
            ));

        api.on_answers(|answers, ctx| {
            if !answers.has_module("css") {
                return Ok(());
            }

            let options = answers
                .get_bool("css_modules")
                .unwrap_or(false)
                .then(|| json!({ "modules": true }));
            ctx.config()
                .rule("css")
                .test(r"\.css$")
                .loader("style-loader", None)
                .loader("css-loader", options);

            ctx.manifest()
                .dev_dependency("css-loader", "^7.1.1")
                .dev_dependency("style-loader", "^4.0.0");
            Ok(())
        });
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::{generate, try_generate};
    use packgen_core::AnswerMap;

    #[tokio::test]
    async fn test_css_loaders_in_order() {
        let (config, manifest) = generate(&["css"]).await;

        let style = config.find("style-loader").unwrap();
        let css = config.find("css-loader").unwrap();
        assert!(style < css);
        assert!(!config.contains("modules: true"));
        assert_eq!(manifest["devDependencies"]["css-loader"], "^7.1.1");
    }

    #[tokio::test]
    async fn test_css_modules_option() {
        let answers = AnswerMap::new().with("css_modules", true);
        let (config, _) = try_generate(&["css"], answers).await.unwrap();
        assert!(config.contains("modules: true,"));
    }
}
