//! Student record stored by the registry.

use std::fmt;

use crate::merge::Merge;

/// A registered student
///
/// Every attribute besides the id is optional so the same type can carry a
/// partial update: merging a `Student` with `name: None` keeps the stored
/// name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Student {
    pub id: u64,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub specialty: Option<String>,
}

impl Student {
    /// Create a fully populated record
    pub fn new(id: u64, name: impl Into<String>, age: u32, specialty: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            age: Some(age),
            specialty: Some(specialty.into()),
        }
    }

    /// Create an update for `id` that changes nothing until fields are set
    pub fn patch(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// Returns `self` with every field present in `update` applied
    pub fn merged(mut self, update: Student) -> Self {
        self.merge(update);
        self
    }
}

impl Merge for Student {
    fn merge(&mut self, incoming: Self) {
        debug_assert_eq!(self.id, incoming.id, "merging records with different ids");
        self.name.merge(incoming.name);
        self.age.merge(incoming.age);
        self.specialty.merge(incoming.specialty);
    }
}

struct OrNone<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Age: {}, Specialty: {}",
            self.id,
            OrNone(&self.name),
            OrNone(&self.age),
            OrNone(&self.specialty)
        )
    }
}
