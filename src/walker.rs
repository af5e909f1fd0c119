//! Directory traversal and the per-file generation pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classifier::classify;
use crate::definition::parse_definition;
use crate::errors::{Result, SkelgenError};
use crate::merge::{merge, ExistingSource};
use crate::storage::Storage;
use crate::validator::SyntaxValidator;

/// Filename suffix marking a test definition file.
pub const DEFINITION_SUFFIX: &str = ".tests";

/// What happened to a single definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// A new skeleton file was written.
    Created,
    /// Missing stubs were appended to an existing file.
    Appended { methods: usize },
    /// Nothing was missing; the existing file was not touched.
    Unchanged,
}

/// Per-file result of a directory run.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Path of the definition file, relative to wherever the walk started.
    pub definition: PathBuf,
    /// Generated class name.
    pub class_name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// A definition file that failed during a keep-going run.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub definition: PathBuf,
    pub error: String,
}

/// Aggregate result of a directory run.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<FileOutcome>,
    pub failures: Vec<Failure>,
}

impl RunReport {
    /// Whether any file failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Error-handling policy for a directory run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the whole run on the first failing definition file.
    FailFast,
    /// Record the failure, warn, and continue with the next file.
    KeepGoing,
}

/// Process one definition file: parse, merge, validate, write.
///
/// Returns the outcome without writing anything when the existing file
/// already contains every wanted method. A validation failure aborts
/// before the write, so no partial file is ever persisted.
pub fn process_file(
    path: &Path,
    storage: &dyn Storage,
    validator: &dyn SyntaxValidator,
) -> Result<FileOutcome> {
    let content = fs::read_to_string(path)?;
    let definition = parse_definition(&content)?;
    let class_name = definition.class_name;
    let base_class = classify(&class_name).base_class();

    let existing = if storage.exists(&class_name) {
        Some(ExistingSource::from_source(&storage.read_source(&class_name)?))
    } else {
        None
    };

    let outcome = match merge(&class_name, base_class, &definition.methods, existing.as_ref()) {
        None => Outcome::Unchanged,
        Some(source) => {
            let report = validator.check(&source, base_class)?;
            if !report.ok {
                return Err(SkelgenError::Validation {
                    class_name,
                    diagnostic: report.diagnostic.unwrap_or_default(),
                });
            }
            storage.write(&class_name, &source)?;
            match &existing {
                None => Outcome::Created,
                Some(existing) => Outcome::Appended {
                    methods: definition
                        .methods
                        .iter()
                        .filter(|m| !existing.methods.contains(m.as_str()))
                        .count(),
                },
            }
        }
    };

    Ok(FileOutcome {
        definition: path.to_path_buf(),
        class_name,
        outcome,
    })
}

/// Recursively process every `.tests` file under `dir`.
///
/// Entries are visited in name order so repeated runs over an unchanged
/// tree produce the same output in the same order. With
/// `ErrorPolicy::FailFast` the first per-file failure aborts the run;
/// with `ErrorPolicy::KeepGoing` it is recorded in the report and the
/// walk continues. Errors enumerating the tree itself always abort.
pub fn process_directory(
    dir: &Path,
    storage: &dyn Storage,
    validator: &dyn SyntaxValidator,
    policy: ErrorPolicy,
) -> Result<RunReport> {
    let mut report = RunReport::default();
    walk(dir, storage, validator, policy, &mut report)?;
    Ok(report)
}

fn walk(
    dir: &Path,
    storage: &dyn Storage,
    validator: &dyn SyntaxValidator,
    policy: ErrorPolicy,
    report: &mut RunReport,
) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            walk(&entry, storage, validator, policy, report)?;
        } else if entry
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(DEFINITION_SUFFIX))
        {
            match process_file(&entry, storage, validator) {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(e) if policy == ErrorPolicy::KeepGoing => {
                    eprintln!("warning: {}: {e}", entry.display());
                    report.failures.push(Failure {
                        definition: entry,
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStorage;
    use crate::validator::{CheckReport, NoopValidator};
    use std::fs;
    use tempfile::tempdir;

    /// Validator that rejects everything with a fixed diagnostic.
    struct RejectAll;

    impl SyntaxValidator for RejectAll {
        fn check(&self, _source: &str, _base_class: &str) -> Result<CheckReport> {
            Ok(CheckReport::fail("parse error on line 1"))
        }
    }

    fn write_definition(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn creates_a_skeleton_for_a_fresh_definition() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let def = write_definition(dir.path(), "DemoClass.tests", "DemoClass\nshould work\n");

        let outcome = process_file(&def, &storage, &NoopValidator).unwrap();

        assert_eq!(outcome.class_name, "DemoClassTest");
        assert_eq!(outcome.outcome, Outcome::Created);
        let generated = dir.path().join("application/library/DemoClassTest.php");
        let source = fs::read_to_string(generated).unwrap();
        assert!(source.contains("class DemoClassTest extends PHPUnit_Framework_TestCase"));
        assert_eq!(source.matches("public function").count(), 1);
        assert!(source.contains("public function testShouldWork()"));
    }

    #[test]
    fn appends_only_the_missing_method() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let def = write_definition(dir.path(), "DemoClass.tests", "DemoClass\nshould work\n");
        process_file(&def, &storage, &NoopValidator).unwrap();

        let def = write_definition(
            dir.path(),
            "DemoClass.tests",
            "DemoClass\nshould work\nshould fail\n",
        );
        let outcome = process_file(&def, &storage, &NoopValidator).unwrap();

        assert_eq!(outcome.outcome, Outcome::Appended { methods: 1 });
        let source =
            fs::read_to_string(dir.path().join("application/library/DemoClassTest.php")).unwrap();
        assert_eq!(source.matches("testShouldWork").count(), 1);
        assert!(source.find("testShouldWork").unwrap() < source.find("testShouldFail").unwrap());
    }

    #[test]
    fn rerun_leaves_the_file_untouched() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let def = write_definition(dir.path(), "DemoClass.tests", "DemoClass\nshould work\n");

        process_file(&def, &storage, &NoopValidator).unwrap();
        let generated = dir.path().join("application/library/DemoClassTest.php");
        let before = fs::read(&generated).unwrap();
        let mtime = fs::metadata(&generated).unwrap().modified().unwrap();

        let outcome = process_file(&def, &storage, &NoopValidator).unwrap();

        assert_eq!(outcome.outcome, Outcome::Unchanged);
        assert_eq!(fs::read(&generated).unwrap(), before);
        assert_eq!(fs::metadata(&generated).unwrap().modified().unwrap(), mtime);
    }

    #[test]
    fn validation_failure_persists_nothing() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let def = write_definition(dir.path(), "DemoClass.tests", "DemoClass\nshould work\n");

        let err = process_file(&def, &storage, &RejectAll).unwrap_err();

        match err {
            SkelgenError::Validation {
                class_name,
                diagnostic,
            } => {
                assert_eq!(class_name, "DemoClassTest");
                assert!(diagnostic.contains("parse error on line 1"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(!dir.path().join("application/library/DemoClassTest.php").exists());
    }

    #[test]
    fn empty_definition_file_is_malformed() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let def = write_definition(dir.path(), "Empty.tests", "");

        assert!(matches!(
            process_file(&def, &storage, &NoopValidator),
            Err(SkelgenError::MalformedDefinition { .. })
        ));
    }

    #[test]
    fn walks_nested_directories_and_skips_other_files() {
        let dir = tempdir().unwrap();
        let defs = dir.path().join("definitions");
        fs::create_dir_all(defs.join("nested")).unwrap();
        write_definition(&defs, "Alpha.tests", "Alpha\nshould work\n");
        write_definition(&defs.join("nested"), "Beta.tests", "Beta\nshould work\n");
        write_definition(&defs, "notes.txt", "not a definition");

        let storage = FileStorage::new(dir.path());
        let report =
            process_directory(&defs, &storage, &NoopValidator, ErrorPolicy::FailFast).unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert!(!report.has_failures());
        assert!(dir.path().join("application/library/AlphaTest.php").is_file());
        assert!(dir.path().join("application/library/BetaTest.php").is_file());
    }

    #[test]
    fn discovery_order_is_stable() {
        let dir = tempdir().unwrap();
        let defs = dir.path().join("definitions");
        fs::create_dir_all(&defs).unwrap();
        write_definition(&defs, "Zulu.tests", "Zulu\nshould work\n");
        write_definition(&defs, "Alpha.tests", "Alpha\nshould work\n");

        let storage = FileStorage::new(dir.path());
        let report =
            process_directory(&defs, &storage, &NoopValidator, ErrorPolicy::FailFast).unwrap();

        let names: Vec<_> = report.outcomes.iter().map(|o| o.class_name.as_str()).collect();
        assert_eq!(names, vec!["AlphaTest", "ZuluTest"]);
    }

    #[test]
    fn fail_fast_aborts_on_first_failure() {
        let dir = tempdir().unwrap();
        let defs = dir.path().join("definitions");
        fs::create_dir_all(&defs).unwrap();
        write_definition(&defs, "Alpha.tests", "Alpha\nshould work\n");

        let storage = FileStorage::new(dir.path());
        let result = process_directory(&defs, &storage, &RejectAll, ErrorPolicy::FailFast);

        assert!(matches!(result, Err(SkelgenError::Validation { .. })));
    }

    #[test]
    fn keep_going_records_failures_and_continues() {
        let dir = tempdir().unwrap();
        let defs = dir.path().join("definitions");
        fs::create_dir_all(&defs).unwrap();
        write_definition(&defs, "Bad.tests", "");
        write_definition(&defs, "Good.tests", "Good\nshould work\n");

        let storage = FileStorage::new(dir.path());
        let report =
            process_directory(&defs, &storage, &NoopValidator, ErrorPolicy::KeepGoing).unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].definition, defs.join("Bad.tests"));
        assert!(dir.path().join("application/library/GoodTest.php").is_file());
    }
}
