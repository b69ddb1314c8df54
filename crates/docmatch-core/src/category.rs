//! Document categories: the three kinds the index partitions by.

use serde::{Deserialize, Serialize};

/// The three document categories served by the matching subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Requirement specifications (screens + backend operations).
    Spec,
    /// Technical designs (API endpoints + data entities).
    Design,
    /// Test-case sets.
    TestSuite,
}

impl Category {
    /// All categories, in the order collections are reported.
    pub const ALL: [Category; 3] = [Category::Spec, Category::Design, Category::TestSuite];

    /// Logical collection name for this category.
    pub fn collection_name(&self) -> &'static str {
        match self {
            Category::Spec => "spec_documents",
            Category::Design => "design_documents",
            Category::TestSuite => "test_documents",
        }
    }

    /// Stable string form used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spec => "spec",
            Category::Design => "design",
            Category::TestSuite => "test_suite",
        }
    }

    /// Parse the stable string form. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "spec" => Some(Category::Spec),
            "design" => Some(Category::Design),
            "test_suite" => Some(Category::TestSuite),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
