//! Domain records.
//!
//! Entities are flat and immutable once fetched. Wire and catalogue files use camelCase field
//! names; the closed enumerations serialise to the lower-case values the product has always used.

pub mod appointment;
pub mod article;
pub mod doctor;
pub mod specialty;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus, AppointmentType, Gender};
pub use article::Article;
pub use doctor::Doctor;
pub use specialty::Specialty;
pub use user::{User, UserType};

/// A record with an identifier unique within its collection.
pub trait Entity {
    /// Collection name used in error messages and logs.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Returns the first id that occurs more than once in `items`.
pub fn first_duplicate_id<T: Entity>(items: &[T]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    items.iter().map(T::id).find(|id| !seen.insert(*id))
}
