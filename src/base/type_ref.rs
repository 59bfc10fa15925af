use smol_str::SmolStr;
use std::fmt;

/// A reference to a single named type awaiting extraction.
///
/// Equality is structural over (package path, type name). A `TypeRef` is
/// created when the walker discovers a reference, consumed when the driver
/// pops it from the pending queue, and retired into the processed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub package: String,
    pub name: SmolStr,
}

impl TypeRef {
    pub fn new(package: impl Into<String>, name: impl Into<SmolStr>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}
