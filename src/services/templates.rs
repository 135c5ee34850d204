//! Message template service

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::models::{CreateTemplateRequest, Template};
use crate::session::Session;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct TemplateService {
    api: ApiClient,
}

impl TemplateService {
    pub fn new(session: &Session) -> Result<Self> {
        Ok(Self { api: session.api()? })
    }

    pub async fn list(&self) -> Result<Vec<Template>> {
        let templates = self.api.list_templates().await?;
        debug!(count = templates.len(), "Fetched templates");
        Ok(templates)
    }

    pub async fn create(&self, name: &str, content: &str) -> Result<Template> {
        let request = CreateTemplateRequest::new(name, content);
        request.validate()?;

        let template = self.api.create_template(&request).await?;
        info!(template_id = %template.id, length = template.content.chars().count(), "Template created");
        Ok(template)
    }
}
