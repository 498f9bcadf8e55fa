// skuflow-core/src/infrastructure/template/jinja.rs

// Turns the report view model into the HTML overview page.
// Templates registered with an `.html` name are auto-escaped, so every cell
// coming from the sheets is rendered as text, never as markup.

use crate::application::ports::TemplateEngine;
use crate::error::SkuflowError;
use crate::infrastructure::error::InfrastructureError;
use minijinja::Environment;

pub const DATA_OVERVIEW_TEMPLATE: &str = "data_overview.html";

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();

        env.add_template(
            DATA_OVERVIEW_TEMPLATE,
            include_str!("../../../templates/data_overview.html"),
        )?;

        Ok(Self { env })
    }
}

impl TemplateEngine for JinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, SkuflowError> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(InfrastructureError::TemplateError)?;

        tmpl.render(context)
            .map_err(|e| SkuflowError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
