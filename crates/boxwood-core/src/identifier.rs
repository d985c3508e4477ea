//! Element identities backed by string interning.
//!
//! An [`ElementId`] names one domain object that contributes a box to the
//! diagram. It is only ever compared and hashed, never dereferenced, so two
//! boxes with identical text stay distinct as long as their ids differ.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for element names.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner holds no invariants a panicking writer could break.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Opaque identity of a domain object.
///
/// Names are interned once per process. Numeric handles are stored as is
/// and never touch the interner, so per-request handles leave no shared
/// state behind.
///
/// # Examples
///
/// ```
/// use boxwood_core::identifier::ElementId;
///
/// let order = ElementId::new("order-17");
/// assert_eq!(order, ElementId::new("order-17"));
/// assert_ne!(order, ElementId::new("order-18"));
///
/// // Numeric handles never collide with names.
/// assert_ne!(ElementId::from_handle(17), ElementId::new("17"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
    Name(DefaultSymbol),
    Handle(u64),
}

impl ElementId {
    /// Creates an id from a collaborator-chosen unique key.
    pub fn new(key: &str) -> Self {
        Self(Repr::Name(interner().get_or_intern(key)))
    }

    /// Creates an id from an opaque numeric handle, such as an arena index
    /// or the address of the originating object.
    pub fn from_handle(handle: u64) -> Self {
        Self(Repr::Handle(handle))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Name(symbol) => {
                let interner = interner();
                f.write_str(interner.resolve(symbol).unwrap_or_default())
            }
            Repr::Handle(handle) => write!(f, "#{handle}"),
        }
    }
}

impl From<&str> for ElementId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<u64> for ElementId {
    fn from(handle: u64) -> Self {
        Self::from_handle(handle)
    }
}
