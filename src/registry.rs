//! Registration facade over `KeyedSlotTable<Student>`.
//!
//! Each operation forwards to the table and reports the outcome as a
//! human-readable confirmation line.

use log::info;

use crate::{student::Student, table::KeyedSlotTable};

/// Student registry backed by a `KeyedSlotTable`
#[derive(Debug, Default)]
pub struct Registry {
    table: KeyedSlotTable<Student>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry on top of an existing (possibly custom-sized) table
    pub fn with_table(table: KeyedSlotTable<Student>) -> Self {
        Self { table }
    }

    /// Read access to the backing table
    pub fn table(&self) -> &KeyedSlotTable<Student> {
        &self.table
    }

    /// Register a student
    ///
    /// Registering an id that already exists overwrites its fields.
    pub fn add_student(
        &mut self,
        id: u64,
        name: impl Into<String>,
        age: u32,
        specialty: impl Into<String>,
    ) -> String {
        let student = Student::new(id, name, age, specialty);
        let message = format!("Student {} added.", student.name.as_deref().unwrap_or_default());
        self.table.insert(id, student);
        info!("{message}");
        message
    }

    pub fn remove_student(&mut self, id: u64) -> String {
        if self.table.remove(id) {
            info!("removed student {id}");
            format!("Student with ID {id} removed.")
        } else {
            format!("No student found with ID {id}.")
        }
    }

    /// Apply the fields present in `update` to student `id`
    ///
    /// Fields left as `None` are not touched. Unknown ids are not created.
    pub fn update_student(
        &mut self,
        id: u64,
        name: Option<String>,
        age: Option<u32>,
        specialty: Option<String>,
    ) -> String {
        let update = Student {
            id,
            name,
            age,
            specialty,
        };
        if self.table.update(id, update) {
            info!("updated student {id}");
            format!("Student with ID {id} updated.")
        } else {
            format!("Student with ID {id} not found.")
        }
    }

    /// Look up a student and render it, or report that it is missing
    pub fn find_student(&self, id: u64) -> String {
        match self.table.find(id) {
            Some(student) => student.to_string(),
            None => format!("No student found with ID {id}."),
        }
    }

    /// One line per registered student, in table order
    pub fn list_all_students(&self) -> String {
        let lines: Vec<String> = self.table.values().map(Student::to_string).collect();
        if lines.is_empty() {
            "No students registered.".to_string()
        } else {
            lines.join("\n")
        }
    }
}
