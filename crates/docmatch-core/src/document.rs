//! Structured document content, as produced by the document-generation
//! subsystem. The matching subsystem only reads these shapes at index time.

use serde::{Deserialize, Serialize};

/// Category-specific structured content, plus a generic section fallback
/// for documents that use a flat section list instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentContent {
    Spec {
        #[serde(default)]
        screens: Vec<Screen>,
        #[serde(default)]
        backend_operations: Vec<BackendOperation>,
    },
    Design {
        #[serde(default)]
        services: Vec<ServiceDesign>,
        #[serde(default)]
        entities: Vec<DataEntity>,
    },
    TestSuite {
        #[serde(default)]
        test_cases: Vec<TestCase>,
    },
    Sections {
        sections: Vec<Section>,
    },
}

/// One screen in a requirement spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Screen {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub business_rules: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub validations: Vec<String>,
}

/// One backend operation referenced by a requirement spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendOperation {
    pub name: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub path: String,
}

/// One service in a technical design, with its endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDesign {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// One API endpoint in a technical design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub request_fields: Vec<String>,
    #[serde(default)]
    pub response_fields: Vec<String>,
    #[serde(default)]
    pub error_codes: Vec<String>,
    #[serde(default)]
    pub validations: Vec<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// One data entity in a technical design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataEntity {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<EntityField>,
}

/// A field of a data entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityField {
    pub name: String,
    #[serde(default)]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
}

/// One test case in a test-case set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub precondition: String,
    #[serde(default)]
    pub test_data: String,
    #[serde(default)]
    pub steps: Vec<TestStep>,
    #[serde(default)]
    pub expected_result: String,
}

/// A single ordered step of a test case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestStep {
    pub action: String,
    #[serde(default)]
    pub expected: String,
}

/// One section of a generically structured document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default = "default_section_type")]
    pub section_type: String,
    #[serde(default)]
    pub body: serde_json::Value,
}

fn default_section_type() -> String {
    "general".to_string()
}

impl DocumentContent {
    /// True when the content holds no chunkable items.
    pub fn is_empty(&self) -> bool {
        match self {
            DocumentContent::Spec {
                screens,
                backend_operations,
            } => screens.is_empty() && backend_operations.is_empty(),
            DocumentContent::Design { services, entities } => {
                services.iter().all(|s| s.endpoints.is_empty()) && entities.is_empty()
            }
            DocumentContent::TestSuite { test_cases } => test_cases.is_empty(),
            DocumentContent::Sections { sections } => sections.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_shape_deserializes() {
        let json = serde_json::json!({
            "kind": "sections",
            "sections": [
                { "title": "Overview", "body": { "description": "intro" } }
            ]
        });
        let content: DocumentContent = serde_json::from_value(json).unwrap();
        match content {
            DocumentContent::Sections { sections } => {
                assert_eq!(sections.len(), 1);
                assert_eq!(sections[0].section_type, "general");
            }
            other => panic!("expected Sections, got {other:?}"),
        }
    }

    #[test]
    fn empty_spec_is_empty() {
        let content = DocumentContent::Spec {
            screens: vec![],
            backend_operations: vec![],
        };
        assert!(content.is_empty());
    }
}
