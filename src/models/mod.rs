mod contact;
mod field;
pub mod tags;

pub use contact::{Contact, ContactFields, ContactPatch};
pub use field::Field;
