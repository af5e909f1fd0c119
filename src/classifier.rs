//! Classification of generated class names into storage categories.
//!
//! The category is a pure function of the class name and drives both the
//! base class of the generated test class and the directory bucket the
//! file is written to.

/// Separator between namespace components in a class name.
pub const CLASS_SEPARATOR: char = '_';

/// Base class for behaviour (controller) test classes.
pub const BEHAVIOUR_BASE_CLASS: &str = "Celsus_Test_PHPUnit_ControllerTestCase_Http";

/// Base class for everything else.
pub const DEFAULT_BASE_CLASS: &str = "PHPUnit_Framework_TestCase";

/// Storage category of a test definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Controller behaviour tests.
    Behaviour,
    /// Model tests.
    Model,
    /// Everything else, stored in the library hierarchy.
    Generic,
}

impl Category {
    /// The base class a test class of this category extends.
    #[must_use]
    pub fn base_class(self) -> &'static str {
        match self {
            Category::Behaviour => BEHAVIOUR_BASE_CLASS,
            Category::Model | Category::Generic => DEFAULT_BASE_CLASS,
        }
    }
}

/// Classify a class name into its storage category.
///
/// Behaviour is checked first: a name containing both `Behaviour` and
/// `Model` is a behaviour. A name counts as a model only when it also has
/// more than two `_`-delimited segments; a bare `Demo_Model` is generic.
/// That guard keeps names that merely end in `Model` out of the model
/// bucket.
#[must_use]
pub fn classify(class_name: &str) -> Category {
    if class_name.contains("Behaviour") {
        Category::Behaviour
    } else if class_name.contains("Model") && class_name.split(CLASS_SEPARATOR).count() > 2 {
        Category::Model
    } else {
        Category::Generic
    }
}
