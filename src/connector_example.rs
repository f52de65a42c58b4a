//! Example connector.
//!
//! The smallest complete adapter: one optional field, an always-healthy
//! check, and a single hardcoded document. Useful as a template and for
//! exercising the sync pipeline end to end.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::{ConfigurationError, HealthCheckError, SourceExtractionError};
use crate::models::{ConfigurableFields, Configuration, ConnectorSettings, Document, FieldSpec};
use crate::traits::{check_health_params, Connector, ConnectorKind, DocumentSink};

pub struct ExampleConnector {
    settings: ConnectorSettings,
}

impl ConnectorKind for ExampleConnector {
    fn service_type() -> &'static str {
        "example"
    }

    fn display_name() -> &'static str {
        "Example Connector"
    }

    fn configurable_fields() -> ConfigurableFields {
        ConfigurableFields::new().with("foo", FieldSpec::new("Foo"))
    }

    fn create(local: Configuration, remote: Configuration) -> Result<Self, ConfigurationError> {
        Ok(Self {
            settings: ConnectorSettings::new(local, remote),
        })
    }
}

#[async_trait]
impl Connector for ExampleConnector {
    fn settings(&self) -> &ConnectorSettings {
        &self.settings
    }

    async fn health_check(&self, params: &Value) -> Result<bool, HealthCheckError> {
        check_health_params(params)?;
        Ok(true)
    }

    async fn yield_documents(
        &self,
        sink: &mut dyn DocumentSink,
    ) -> Result<(), SourceExtractionError> {
        sink.accept(Document::new("123").with_field("name", "example document"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn yields_single_document() {
        let connector = ExampleConnector::create(Configuration::new(), Configuration::new()).unwrap();
        let mut docs: Vec<Document> = Vec::new();
        connector.yield_documents(&mut docs).await.unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(
            serde_json::to_value(&docs[0]).unwrap(),
            json!({"id": "123", "name": "example document"})
        );
    }

    #[tokio::test]
    async fn always_healthy() {
        let connector = ExampleConnector::create(Configuration::new(), Configuration::new()).unwrap();
        assert!(connector.health_check(&Value::Null).await.unwrap());
        assert!(connector.health_check(&json!({"deep": true})).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_health_params_rejected() {
        let connector = ExampleConnector::create(Configuration::new(), Configuration::new()).unwrap();
        let err = connector.health_check(&json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, HealthCheckError::InvalidParams(_)));
    }

    #[test]
    fn static_metadata() {
        assert_eq!(ExampleConnector::service_type(), "example");
        assert_eq!(ExampleConnector::display_name(), "Example Connector");

        let fields = ExampleConnector::configurable_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("foo"), Some(&FieldSpec::new("Foo")));
        assert_eq!(fields.get("foo").unwrap().default_value, None);
    }
}
