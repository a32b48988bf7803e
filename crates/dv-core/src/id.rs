//! Interned element identifiers.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static ELEMENT_NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Sequence for generated ids. Starts at 1 and never rewinds, so a reset
/// canvas cannot hand out an id that an older element already used.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Identifier of a placed canvas element (`header`, `logo`, `image-4`).
///
/// Copy-cheap handle into a process-wide interner; equality and hashing
/// never touch the string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    pub fn intern(name: &str) -> Self {
        Self(ELEMENT_NAMES.get_or_intern(name))
    }

    /// The id for `name` if anything has interned it, without interning.
    ///
    /// Use for names arriving from outside (host calls) so unknown strings
    /// don't grow the interner.
    pub fn lookup(name: &str) -> Option<Self> {
        ELEMENT_NAMES.get(name).map(Self)
    }

    pub fn as_str(&self) -> &str {
        ELEMENT_NAMES.resolve(&self.0)
    }

    /// A fresh `<prefix>-<n>` id.
    pub fn with_prefix(prefix: &str) -> Self {
        let n = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}-{n}"))
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|name| Self::intern(&name))
    }
}
