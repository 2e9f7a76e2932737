//! Tri-state field values for partial updates.

use serde::{Deserialize, Deserializer};

/// A single field of a partial update.
///
/// Use with `#[serde(default)]` so an absent key becomes `Missing` while an
/// explicit JSON `null` becomes `Null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key absent: leave the stored value untouched.
    #[default]
    Missing,
    /// Key present with `null`: overwrite with the field's empty value.
    Null,
    /// Key present with a value: overwrite.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Write into `slot` unless the key was absent. `Null` stores `T::default()`.
    pub fn apply_to(&self, slot: &mut T)
    where
        T: Clone + Default,
    {
        match self {
            Patch::Missing => {}
            Patch::Null => *slot = T::default(),
            Patch::Value(v) => *slot = v.clone(),
        }
    }

    /// Write into an optional slot unless the key was absent. `Null` clears it.
    pub fn apply_to_option(&self, slot: &mut Option<T>)
    where
        T: Clone,
    {
        match self {
            Patch::Missing => {}
            Patch::Null => *slot = None,
            Patch::Value(v) => *slot = Some(v.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}
