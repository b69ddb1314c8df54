//! Category-specific chunk extraction.
//!
//! Text assembly mirrors what gets embedded: a labelled header line per
//! item followed by its salient fields, one chunk per screen, backend
//! operation, endpoint, data entity, test case, or generic section.

use serde_json::Value;
use tracing::debug;

use docmatch_core::category::Category;
use docmatch_core::chunk::{Chunk, Metadata};
use docmatch_core::document::{
    BackendOperation, DataEntity, DocumentContent, Screen, Section, ServiceDesign, TestCase,
};

use crate::splitter::split_oversized;

/// A chunk before index assignment and size enforcement.
struct DraftChunk {
    chunk_type: String,
    /// Item name used to label "Part N" pieces after splitting.
    name: String,
    text: String,
    local_metadata: Metadata,
}

/// Split a document's structured content into ordered chunks.
///
/// Chunk indices are assigned last, so they are always exactly `0..n-1`
/// even when oversized chunks were split. Empty content yields an empty
/// list, not an error.
pub fn chunk_document(
    document_id: i64,
    category: Category,
    content: &DocumentContent,
    metadata: &Metadata,
) -> Vec<Chunk> {
    let drafts = match content {
        DocumentContent::Sections { sections } => chunk_sections(sections),
        DocumentContent::Spec {
            screens,
            backend_operations,
        } => chunk_spec(screens, backend_operations),
        DocumentContent::Design { services, entities } => chunk_design(services, entities),
        DocumentContent::TestSuite { test_cases } => chunk_test_suite(test_cases),
    };

    let mut chunks = Vec::new();
    for draft in drafts {
        for part in split_oversized(&draft.name, &draft.text) {
            let mut merged = metadata.clone();
            for (k, v) in &draft.local_metadata {
                merged.insert(k.clone(), v.clone());
            }
            chunks.push(Chunk {
                document_id,
                chunk_index: chunks.len(),
                chunk_type: draft.chunk_type.clone(),
                text: part,
                metadata: merged,
            });
        }
    }

    debug!(
        document_id,
        category = %category,
        chunks = chunks.len(),
        "chunked document"
    );
    chunks
}

fn chunk_spec(screens: &[Screen], operations: &[BackendOperation]) -> Vec<DraftChunk> {
    let mut drafts = Vec::new();

    for screen in screens {
        let mut parts = vec![format!("Screen: {}", screen.name)];
        if !screen.description.is_empty() {
            parts.push(format!("Description: {}", screen.description));
        }
        if !screen.fields.is_empty() {
            parts.push(format!("Fields: {}", screen.fields.join(", ")));
        }
        if !screen.actions.is_empty() {
            parts.push(format!("Actions: {}", screen.actions.join(", ")));
        }
        push_bullet_list(&mut parts, "Business Rules", &screen.business_rules);
        push_bullet_list(&mut parts, "Acceptance Criteria", &screen.acceptance_criteria);
        push_bullet_list(&mut parts, "Validations", &screen.validations);

        let mut local = Metadata::new();
        local.insert("screen_name".to_string(), Value::from(screen.name.clone()));
        local.insert(
            "has_fields".to_string(),
            Value::from(!screen.fields.is_empty()),
        );

        drafts.push(DraftChunk {
            chunk_type: "screen".to_string(),
            name: screen.name.clone(),
            text: parts.join("\n"),
            local_metadata: local,
        });
    }

    for op in operations {
        let mut parts = vec![format!("Backend Operation: {}", op.name)];
        if !op.path.is_empty() {
            parts.push(format!("Endpoint: {} {}", op.method, op.path));
        }

        let mut local = Metadata::new();
        local.insert("operation_name".to_string(), Value::from(op.name.clone()));
        local.insert("endpoint".to_string(), Value::from(op.path.clone()));
        local.insert("method".to_string(), Value::from(op.method.clone()));

        drafts.push(DraftChunk {
            chunk_type: "backend_operation".to_string(),
            name: op.name.clone(),
            text: parts.join("\n"),
            local_metadata: local,
        });
    }

    drafts
}

fn chunk_design(services: &[ServiceDesign], entities: &[DataEntity]) -> Vec<DraftChunk> {
    let mut drafts = Vec::new();

    for service in services {
        for endpoint in &service.endpoints {
            let mut parts = vec![format!("Service: {}", service.name)];
            if !service.description.is_empty() {
                parts.push(format!("Service Description: {}", service.description));
            }
            parts.push(format!("API Endpoint: {} {}", endpoint.method, endpoint.path));
            if !endpoint.description.is_empty() {
                parts.push(format!("Description: {}", endpoint.description));
            }
            if !endpoint.request_fields.is_empty() {
                parts.push(format!("Request: {}", endpoint.request_fields.join(", ")));
            }
            if !endpoint.response_fields.is_empty() {
                parts.push(format!("Response: {}", endpoint.response_fields.join(", ")));
            }
            if !endpoint.error_codes.is_empty() {
                parts.push(format!("Error Codes: {}", endpoint.error_codes.join(", ")));
            }
            push_bullet_list(&mut parts, "Validations", &endpoint.validations);

            let mut local = Metadata::new();
            local.insert("service_name".to_string(), Value::from(service.name.clone()));
            local.insert("endpoint".to_string(), Value::from(endpoint.path.clone()));
            local.insert("method".to_string(), Value::from(endpoint.method.clone()));

            drafts.push(DraftChunk {
                chunk_type: "endpoint".to_string(),
                name: endpoint.path.clone(),
                text: parts.join("\n"),
                local_metadata: local,
            });
        }
    }

    for entity in entities {
        let mut parts = vec![
            format!("Data Entity: {}", entity.name),
            format!("Fields: {} fields", entity.fields.len()),
        ];
        // Field detail capped at the first 10 fields.
        for field in entity.fields.iter().take(10) {
            let required = if field.required { " (required)" } else { "" };
            parts.push(format!("{}: {}{}", field.name, field.field_type, required));
        }

        let mut local = Metadata::new();
        local.insert("entity_name".to_string(), Value::from(entity.name.clone()));
        local.insert("field_count".to_string(), Value::from(entity.fields.len()));

        drafts.push(DraftChunk {
            chunk_type: "data_entity".to_string(),
            name: entity.name.clone(),
            text: parts.join("\n"),
            local_metadata: local,
        });
    }

    drafts
}

fn chunk_test_suite(test_cases: &[TestCase]) -> Vec<DraftChunk> {
    let mut drafts = Vec::new();

    for case in test_cases {
        let mut parts = vec![
            format!("Test Case: {}", case.id),
            format!("Name: {}", case.name),
        ];
        if !case.priority.is_empty() {
            parts.push(format!("Priority: {}", case.priority));
        }
        if !case.precondition.is_empty() {
            parts.push(format!("Precondition: {}", case.precondition));
        }
        if !case.test_data.is_empty() {
            parts.push(format!("Test Data: {}", case.test_data));
        }
        if !case.steps.is_empty() {
            parts.push("Steps:".to_string());
            for (i, step) in case.steps.iter().enumerate() {
                parts.push(format!("  {}. {}", i + 1, step.action));
                if !step.expected.is_empty() {
                    parts.push(format!("     Expected: {}", step.expected));
                }
            }
        }
        if !case.expected_result.is_empty() {
            parts.push(format!("Expected Result: {}", case.expected_result));
        }

        let mut local = Metadata::new();
        local.insert("test_id".to_string(), Value::from(case.id.clone()));
        local.insert("test_name".to_string(), Value::from(case.name.clone()));
        local.insert("priority".to_string(), Value::from(case.priority.clone()));
        local.insert("step_count".to_string(), Value::from(case.steps.len()));

        drafts.push(DraftChunk {
            chunk_type: "test_case".to_string(),
            name: case.id.clone(),
            text: parts.join("\n"),
            local_metadata: local,
        });
    }

    drafts
}

fn chunk_sections(sections: &[Section]) -> Vec<DraftChunk> {
    let mut drafts = Vec::new();

    for section in sections {
        let mut parts = vec![format!("Section: {}", section.title)];
        render_section_body(&mut parts, &section.body);

        let mut local = Metadata::new();
        local.insert(
            "section_title".to_string(),
            Value::from(section.title.clone()),
        );
        local.insert(
            "section_type".to_string(),
            Value::from(section.section_type.clone()),
        );

        drafts.push(DraftChunk {
            chunk_type: section.section_type.clone(),
            name: section.title.clone(),
            text: parts.join("\n"),
            local_metadata: local,
        });
    }

    drafts
}

/// Render the known keys of a generic section body.
fn render_section_body(parts: &mut Vec<String>, body: &Value) {
    let Some(obj) = body.as_object() else {
        return;
    };

    if let Some(desc) = obj.get("description").and_then(Value::as_str) {
        parts.push(format!("Description: {desc}"));
    }
    for key in ["requirements", "security", "components", "apis"] {
        if let Some(items) = obj.get(key).and_then(Value::as_array) {
            if items.is_empty() {
                continue;
            }
            parts.push(format!("{}:", capitalize(key)));
            for item in items {
                if let Some(s) = item.as_str() {
                    parts.push(format!("- {s}"));
                }
            }
        }
    }
}

fn push_bullet_list(parts: &mut Vec<String>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    parts.push(format!("{label}:"));
    for item in items {
        parts.push(format!("- {item}"));
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmatch_core::document::{EntityField, TestStep};

    fn screen(name: &str) -> Screen {
        Screen {
            name: name.to_string(),
            description: format!("{name} screen"),
            fields: vec!["username".to_string(), "password".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn spec_yields_screen_and_operation_chunks() {
        let content = DocumentContent::Spec {
            screens: vec![screen("Login"), screen("Register")],
            backend_operations: vec![BackendOperation {
                name: "Authenticate".to_string(),
                method: "POST".to_string(),
                path: "/api/auth/login".to_string(),
            }],
        };
        let chunks = chunk_document(1, Category::Spec, &content, &Metadata::new());

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chunk_type, "screen");
        assert_eq!(chunks[1].chunk_type, "screen");
        assert_eq!(chunks[2].chunk_type, "backend_operation");
        let indices: Vec<usize> = chunks.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(chunks[2].text.contains("POST /api/auth/login"));
    }

    #[test]
    fn empty_content_yields_no_chunks() {
        let content = DocumentContent::Spec {
            screens: vec![],
            backend_operations: vec![],
        };
        assert!(chunk_document(1, Category::Spec, &content, &Metadata::new()).is_empty());
    }

    #[test]
    fn design_yields_endpoint_and_entity_chunks() {
        let content = DocumentContent::Design {
            services: vec![ServiceDesign {
                name: "PaymentService".to_string(),
                description: "Handles payments".to_string(),
                endpoints: vec![docmatch_core::document::Endpoint {
                    path: "/api/payments".to_string(),
                    method: "POST".to_string(),
                    error_codes: vec!["402".to_string()],
                    ..Default::default()
                }],
            }],
            entities: vec![DataEntity {
                name: "Payment".to_string(),
                fields: (0..15)
                    .map(|i| EntityField {
                        name: format!("field{i}"),
                        field_type: "string".to_string(),
                        required: i == 0,
                    })
                    .collect(),
            }],
        };
        let chunks = chunk_document(7, Category::Design, &content, &Metadata::new());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_type, "endpoint");
        assert!(chunks[0].text.contains("Error Codes: 402"));
        assert_eq!(chunks[1].chunk_type, "data_entity");
        // Field detail caps at 10; the count line still reports all 15.
        assert!(chunks[1].text.contains("Fields: 15 fields"));
        assert!(!chunks[1].text.contains("field10:"));
    }

    #[test]
    fn test_suite_chunks_carry_steps_and_expectations() {
        let content = DocumentContent::TestSuite {
            test_cases: vec![TestCase {
                id: "TC-001".to_string(),
                name: "Successful login".to_string(),
                priority: "high".to_string(),
                steps: vec![
                    TestStep {
                        action: "Enter valid credentials".to_string(),
                        expected: "Fields accept input".to_string(),
                    },
                    TestStep {
                        action: "Press login".to_string(),
                        expected: String::new(),
                    },
                ],
                expected_result: "Dashboard is shown".to_string(),
                ..Default::default()
            }],
        };
        let chunks = chunk_document(3, Category::TestSuite, &content, &Metadata::new());

        assert_eq!(chunks.len(), 1);
        let text = &chunks[0].text;
        assert!(text.contains("Test Case: TC-001"));
        assert!(text.contains("1. Enter valid credentials"));
        assert!(text.contains("Expected: Fields accept input"));
        assert!(text.contains("Expected Result: Dashboard is shown"));
        assert_eq!(chunks[0].metadata["step_count"], Value::from(2));
    }

    #[test]
    fn oversized_screen_splits_with_contiguous_indices() {
        let content = DocumentContent::Spec {
            screens: vec![
                Screen {
                    name: "Huge".to_string(),
                    business_rules: (0..600)
                        .map(|i| format!("rule {i} applies to every request"))
                        .collect(),
                    ..Default::default()
                },
                screen("Login"),
            ],
            backend_operations: vec![],
        };
        let chunks = chunk_document(9, Category::Spec, &content, &Metadata::new());

        assert!(chunks.len() > 2, "oversized screen should split");
        let indices: Vec<usize> = chunks.iter().map(|c| c.chunk_index).collect();
        assert_eq!(indices, (0..chunks.len()).collect::<Vec<_>>());
        assert!(chunks[0].text.contains("Huge (Part 1)"));
        assert!(chunks.iter().all(|c| c.estimated_tokens() <= 1024));
    }

    #[test]
    fn chunk_metadata_inherits_document_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("project_id".to_string(), Value::from(12));
        let content = DocumentContent::Spec {
            screens: vec![screen("Login")],
            backend_operations: vec![],
        };
        let chunks = chunk_document(5, Category::Spec, &content, &metadata);
        assert_eq!(chunks[0].metadata["project_id"], Value::from(12));
        assert_eq!(chunks[0].metadata["screen_name"], Value::from("Login"));
    }

    #[test]
    fn generic_sections_render_known_keys() {
        let content = DocumentContent::Sections {
            sections: vec![Section {
                title: "Security".to_string(),
                section_type: "security".to_string(),
                body: serde_json::json!({
                    "description": "Auth hardening",
                    "requirements": ["MFA for admins", "Session expiry"]
                }),
            }],
        };
        let chunks = chunk_document(2, Category::Spec, &content, &Metadata::new());

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_type, "security");
        assert!(chunks[0].text.contains("Section: Security"));
        assert!(chunks[0].text.contains("- MFA for admins"));
    }
}
