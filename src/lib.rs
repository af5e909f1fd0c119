pub mod classifier;
pub mod definition;
pub mod errors;
pub mod merge;
pub mod sanitizer;
pub mod storage;
pub mod validator;
pub mod walker;

// Re-export key types at crate root for convenience.
pub use classifier::{classify, Category};
pub use definition::{parse_definition, TestDefinition};
pub use errors::{Result, SkelgenError};
pub use merge::{merge, ExistingSource};
pub use sanitizer::sanitize;
pub use storage::{FileStorage, Storage};
pub use validator::{CheckReport, NoopValidator, PhpBinaryValidator, SyntaxValidator};
pub use walker::{process_directory, process_file, ErrorPolicy, Outcome, RunReport};
