//! Persistence of generated test classes, addressed by class name.
//!
//! The storage location of a class follows its category: behaviours and
//! models each have a fixed bucket, while generic classes are nested in
//! the library hierarchy according to their `_`-delimited namespace
//! components.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::classifier::{classify, Category, CLASS_SEPARATOR};
use crate::errors::Result;

/// Bucket for behaviour tests, relative to the root path.
const BEHAVIOUR_PATH: &str = "application/behaviours";

/// Bucket for model tests, relative to the root path.
const MODEL_PATH: &str = "application/models";

/// Root of the library hierarchy for generic tests, relative to the root path.
const LIBRARY_PATH: &str = "application/library";

/// Persistence interface for generated test classes.
///
/// Implementations are addressed purely by class name; path resolution is
/// their concern, not the merge engine's.
pub trait Storage {
    /// Whether a generated file already exists for the class.
    fn exists(&self, class_name: &str) -> bool;

    /// The trimmed source text of the existing generated file.
    fn read_source(&self, class_name: &str) -> Result<String>;

    /// Write generated source, creating missing directories.
    fn write(&self, class_name: &str, source: &str) -> Result<()>;
}

/// File-backed storage rooted at a test-tree directory.
pub struct FileStorage {
    root: PathBuf,
    // Class names are unique keys; each entry is resolved once per run.
    paths: RefCell<HashMap<String, PathBuf>>,
}

impl FileStorage {
    /// Create storage rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            paths: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve (and cache) the output path for a class name.
    ///
    /// The filename is the final `_`-delimited component plus `.php`; the
    /// directory follows the classifier's category, with generic classes
    /// nested under the library path by their remaining components.
    pub fn path_for(&self, class_name: &str) -> PathBuf {
        if let Some(path) = self.paths.borrow().get(class_name) {
            return path.clone();
        }

        let mut components: Vec<&str> = class_name.split(CLASS_SEPARATOR).collect();
        let filename = format!("{}.php", components.pop().unwrap_or(class_name));

        let dir = match classify(class_name) {
            Category::Behaviour => self.root.join(BEHAVIOUR_PATH),
            Category::Model => self.root.join(MODEL_PATH),
            Category::Generic => {
                let mut dir = self.root.join(LIBRARY_PATH);
                for component in components {
                    dir.push(component);
                }
                dir
            }
        };

        let path = dir.join(filename);
        self.paths
            .borrow_mut()
            .insert(class_name.to_string(), path.clone());
        path
    }
}

impl Storage for FileStorage {
    fn exists(&self, class_name: &str) -> bool {
        self.path_for(class_name).is_file()
    }

    fn read_source(&self, class_name: &str) -> Result<String> {
        let content = fs::read_to_string(self.path_for(class_name))?;
        Ok(content.trim().to_string())
    }

    fn write(&self, class_name: &str, source: &str) -> Result<()> {
        let path = self.path_for(class_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, source)?;
        Ok(())
    }
}
