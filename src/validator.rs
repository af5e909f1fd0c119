//! Syntax validation of generated source before it is written.
//!
//! The generated text is checked by an external interpreter: the candidate
//! source is placed behind a stand-in declaration of its base class in a
//! scratch file, and the interpreter is asked to run it. A non-zero exit
//! means the generated text is broken and must not be persisted.

use std::io::Write;
use std::process::Command;

use crate::errors::Result;

/// Outcome of a syntax check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Whether the source parsed and ran cleanly.
    pub ok: bool,
    /// Interpreter output when the check failed.
    pub diagnostic: Option<String>,
}

impl CheckReport {
    /// A passing report.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            ok: true,
            diagnostic: None,
        }
    }

    /// A failing report carrying the interpreter's output.
    #[must_use]
    pub fn fail(diagnostic: impl Into<String>) -> Self {
        Self {
            ok: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Checks candidate source text for syntax errors.
pub trait SyntaxValidator {
    /// Check `source`, which declares a class extending `base_class`.
    fn check(&self, source: &str, base_class: &str) -> Result<CheckReport>;
}

/// Validator that spawns a PHP interpreter against a scratch file.
pub struct PhpBinaryValidator {
    binary: String,
}

impl PhpBinaryValidator {
    /// Use the given interpreter binary (usually `php`).
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PhpBinaryValidator {
    fn default() -> Self {
        Self::new("php")
    }
}

impl SyntaxValidator for PhpBinaryValidator {
    fn check(&self, source: &str, base_class: &str) -> Result<CheckReport> {
        // The candidate extends a base class that does not exist in
        // isolation, so a stand-in is declared ahead of it. The candidate
        // arrives with its own `<?php` opener, hence the closing tag.
        let mut scratch = tempfile::Builder::new()
            .prefix("skelgen-check-")
            .suffix(".php")
            .tempfile()?;
        write!(scratch, "<?php class {base_class} {{}} ?>\n\n{source}")?;

        let output = Command::new(&self.binary).arg(scratch.path()).output()?;
        if output.status.success() {
            Ok(CheckReport::pass())
        } else {
            let mut diagnostic = String::from_utf8_lossy(&output.stdout).into_owned();
            diagnostic.push_str(&String::from_utf8_lossy(&output.stderr));
            Ok(CheckReport::fail(diagnostic.trim().to_string()))
        }
    }
}

/// Validator that accepts everything; used when no interpreter is available.
pub struct NoopValidator;

impl SyntaxValidator for NoopValidator {
    fn check(&self, _source: &str, _base_class: &str) -> Result<CheckReport> {
        Ok(CheckReport::pass())
    }
}
