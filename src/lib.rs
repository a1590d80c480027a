//! Open-addressed table keyed by `u64` with double hashing, tombstone
//! deletion and prime-sized resizing.
//!
//! ```
//! use primetable::{InsertOutcome, KeyedSlotTable};
//!
//! let mut table = KeyedSlotTable::new();
//! assert_eq!(table.insert(7, Some("seven")), InsertOutcome::Inserted);
//! // `None` leaves the stored value alone
//! assert_eq!(table.insert(7, None), InsertOutcome::Updated);
//! assert_eq!(table.find(7), Some(&Some("seven")));
//! assert!(table.remove(7));
//! assert!(table.find(7).is_none());
//! ```

pub mod config;
pub mod error;
pub mod iter;
pub mod logging;
pub mod merge;
pub mod prime;
pub mod probe;
pub mod registry;
pub mod slot;
pub mod student;
pub mod table;

pub use config::TableConfig;
pub use error::TableError;
pub use merge::Merge;
pub use registry::Registry;
pub use student::Student;
pub use table::{InsertOutcome, KeyedSlotTable};
