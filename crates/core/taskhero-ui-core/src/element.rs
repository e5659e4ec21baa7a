//! Opaque references to page elements

use std::fmt;

/// Key under which the platform layer registered an element
///
/// Controllers never touch elements directly; they hand keys back to their
/// surface, which resolves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(pub u32);

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el-{}", self.0)
    }
}
