//! Parsing of `.tests` definition files.

use crate::errors::{Result, SkelgenError};
use crate::sanitizer::sanitize;

/// Suffix appended to the header line to form the generated class name.
const CLASS_SUFFIX: &str = "Test";

/// A parsed test definition: the target class plus the wanted method names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDefinition {
    /// Name of the class to generate, header line plus the `Test` suffix.
    pub class_name: String,
    /// Sanitized method identifiers, in definition-file order.
    pub methods: Vec<String>,
}

/// Parse the content of a definition file.
///
/// Line 1 is the target class name (trimmed); every following line is a
/// free-text test description run through the sanitizer. Blank description
/// lines are kept only if anything survives sanitization beyond the bare
/// `test` prefix.
pub fn parse_definition(content: &str) -> Result<TestDefinition> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| SkelgenError::MalformedDefinition {
            message: "missing header line".to_string(),
        })?;

    let methods = lines
        .map(sanitize)
        .filter(|m| m != "test")
        .collect::<Vec<_>>();

    Ok(TestDefinition {
        class_name: format!("{header}{CLASS_SUFFIX}"),
        methods,
    })
}
