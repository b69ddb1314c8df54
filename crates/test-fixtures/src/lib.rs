//! Sample documents shared across integration tests.
//!
//! The fixtures mirror the shapes the document-generation side produces:
//! a login-focused requirement spec, an unrelated invoicing spec, an
//! authentication service design, and a login test-case set.

use serde_json::json;

use docmatch_core::chunk::Metadata;
use docmatch_core::document::{
    BackendOperation, DataEntity, DocumentContent, Endpoint, EntityField, Screen, ServiceDesign,
    TestCase, TestStep,
};

/// Standard document metadata: title plus version.
pub fn doc_metadata(title: &str, version: i64) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("title".to_string(), json!(title));
    meta.insert("version".to_string(), json!(version));
    meta
}

/// Metadata for [`sample_spec`].
pub fn spec_metadata() -> Metadata {
    doc_metadata("Login Spec", 1)
}

/// A requirement spec about login and authentication: two screens and
/// one backend operation, so it chunks into exactly three entries.
pub fn sample_spec() -> DocumentContent {
    DocumentContent::Spec {
        screens: vec![
            Screen {
                name: "Login Screen".to_string(),
                description: "User login with email and password authentication".to_string(),
                fields: vec![
                    "email".to_string(),
                    "password".to_string(),
                    "remember me".to_string(),
                ],
                actions: vec!["login".to_string(), "forgot password".to_string()],
                business_rules: vec![
                    "Account locks after 5 failed login attempts".to_string(),
                ],
                acceptance_criteria: vec![
                    "User can login with valid credentials".to_string(),
                    "Invalid password shows an error message".to_string(),
                ],
                validations: vec!["email must be a valid address".to_string()],
            },
            Screen {
                name: "Password Reset Screen".to_string(),
                description: "Reset a forgotten password via email link".to_string(),
                fields: vec!["email".to_string()],
                actions: vec!["send reset link".to_string()],
                business_rules: vec![],
                acceptance_criteria: vec!["Reset email arrives within a minute".to_string()],
                validations: vec![],
            },
        ],
        backend_operations: vec![BackendOperation {
            name: "authenticate user".to_string(),
            method: "POST".to_string(),
            path: "/api/auth/login".to_string(),
        }],
    }
}

/// Metadata for [`unrelated_spec`].
pub fn unrelated_spec_metadata() -> Metadata {
    doc_metadata("Invoice Spec", 1)
}

/// A requirement spec with no authentication vocabulary, for ranking
/// assertions.
pub fn unrelated_spec() -> DocumentContent {
    DocumentContent::Spec {
        screens: vec![Screen {
            name: "Invoice List Screen".to_string(),
            description: "Browse and filter monthly invoices".to_string(),
            fields: vec![
                "invoice number".to_string(),
                "amount".to_string(),
                "due date".to_string(),
            ],
            actions: vec!["export csv".to_string(), "mark paid".to_string()],
            business_rules: vec!["Overdue invoices are highlighted".to_string()],
            acceptance_criteria: vec!["Invoices sort by due date".to_string()],
            validations: vec![],
        }],
        backend_operations: vec![],
    }
}

/// Metadata for [`sample_design`].
pub fn design_metadata() -> Metadata {
    doc_metadata("Auth Service Design", 2)
}

/// A technical design for the authentication service.
pub fn sample_design() -> DocumentContent {
    DocumentContent::Design {
        services: vec![ServiceDesign {
            name: "AuthService".to_string(),
            description: "Issues and validates session tokens".to_string(),
            endpoints: vec![
                Endpoint {
                    path: "/api/auth/login".to_string(),
                    method: "POST".to_string(),
                    description: "Authenticate with email and password".to_string(),
                    request_fields: vec!["email".to_string(), "password".to_string()],
                    response_fields: vec!["token".to_string(), "expires_at".to_string()],
                    error_codes: vec!["401".to_string(), "423".to_string()],
                    validations: vec!["password must not be empty".to_string()],
                },
                Endpoint {
                    path: "/api/auth/logout".to_string(),
                    method: "POST".to_string(),
                    description: "Invalidate the current session token".to_string(),
                    request_fields: vec!["token".to_string()],
                    response_fields: vec![],
                    error_codes: vec!["401".to_string()],
                    validations: vec![],
                },
            ],
        }],
        entities: vec![DataEntity {
            name: "Session".to_string(),
            fields: vec![
                EntityField {
                    name: "token".to_string(),
                    field_type: "string".to_string(),
                    required: true,
                },
                EntityField {
                    name: "user_id".to_string(),
                    field_type: "integer".to_string(),
                    required: true,
                },
                EntityField {
                    name: "expires_at".to_string(),
                    field_type: "datetime".to_string(),
                    required: true,
                },
            ],
        }],
    }
}

/// Metadata for [`sample_test_suite`].
pub fn test_suite_metadata() -> Metadata {
    doc_metadata("Login Test Suite", 1)
}

/// Test cases covering the login flow.
pub fn sample_test_suite() -> DocumentContent {
    DocumentContent::TestSuite {
        test_cases: vec![
            TestCase {
                id: "TC-001".to_string(),
                name: "Successful login".to_string(),
                priority: "high".to_string(),
                precondition: "A registered user exists".to_string(),
                test_data: "user@example.com / correct password".to_string(),
                steps: vec![
                    TestStep {
                        action: "Open the login screen".to_string(),
                        expected: "Login form is visible".to_string(),
                    },
                    TestStep {
                        action: "Enter valid credentials and submit".to_string(),
                        expected: "Dashboard opens".to_string(),
                    },
                ],
                expected_result: "User is authenticated".to_string(),
            },
            TestCase {
                id: "TC-002".to_string(),
                name: "Login with wrong password".to_string(),
                priority: "high".to_string(),
                precondition: "A registered user exists".to_string(),
                test_data: "user@example.com / wrong password".to_string(),
                steps: vec![TestStep {
                    action: "Enter an invalid password and submit".to_string(),
                    expected: "Error message is shown".to_string(),
                }],
                expected_result: "User stays on the login screen".to_string(),
            },
        ],
    }
}
