//! The merge engine: renders new skeleton classes and appends missing
//! method stubs to previously generated ones.
//!
//! Merging is append-only. Methods already present in the existing source
//! are never rewritten, reordered, or removed; a run that finds nothing
//! missing produces no output at all, so the file on disk keeps its bytes
//! and its modification time.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Method declarations in a generated file: `public function testFoo(`.
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+function\s+(\w+)\s*\(").expect("method regex must compile")
});

/// Previously generated source for a class, as loaded from storage.
#[derive(Debug, Clone)]
pub struct ExistingSource {
    /// Trimmed source text of the generated file.
    pub source: String,
    /// Method names already declared in the file.
    pub methods: HashSet<String>,
}

impl ExistingSource {
    /// Build from raw source text, extracting the declared method names.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self {
            methods: extract_method_names(source),
            source: source.trim().to_string(),
        }
    }
}

/// Extract the declared method names from generated source text.
///
/// Textual extraction is deliberate: the generated file is never loaded or
/// executed to discover what it contains.
#[must_use]
pub fn extract_method_names(source: &str) -> HashSet<String> {
    METHOD_RE
        .captures_iter(source)
        .map(|c| c[1].to_string())
        .collect()
}

/// Produce the source text for a class, or `None` when nothing is missing.
///
/// With no existing source, renders a complete skeleton containing every
/// wanted method in order. With existing source, appends stubs for the
/// wanted methods not already present, keeping their relative order from
/// the definition file. `None` means the caller must not write: the
/// existing file is already complete.
#[must_use]
pub fn merge(
    class_name: &str,
    base_class: &str,
    wanted: &[String],
    existing: Option<&ExistingSource>,
) -> Option<String> {
    match existing {
        None => Some(render_class(class_name, base_class, wanted)),
        Some(existing) => {
            let missing: Vec<&String> = wanted
                .iter()
                .filter(|m| !existing.methods.contains(m.as_str()))
                .collect();
            if missing.is_empty() {
                return None;
            }
            Some(append_stubs(&existing.source, &missing))
        }
    }
}

/// Render a complete skeleton class.
fn render_class(class_name: &str, base_class: &str, methods: &[String]) -> String {
    let mut source = format!("<?php\n\nclass {class_name} extends {base_class} {{\n\n\t// Tests\n\n");
    for method in methods {
        source.push_str(&render_stub(method));
    }
    source.push_str("\n}");
    source
}

/// Append stubs to existing source by reopening the class body.
///
/// The existing source is expected to end with `\n}`; those two characters
/// are stripped, the stubs appended, and the class closed again.
fn append_stubs(source: &str, methods: &[&String]) -> String {
    let mut source = source[..source.len().saturating_sub(2)].to_string();
    for method in methods {
        source.push_str(&render_stub(method));
    }
    source.push_str("\n}");
    source
}

/// Render a single not-yet-implemented stub method.
fn render_stub(method: &str) -> String {
    format!(
        "\n\n\tpublic function {method}() {{\n\t\t$this->markTestIncomplete(\"Not implemented yet.\");\n\t}}"
    )
}
