//! Stock validators.
//!
//! Both rules are generic over any [`Kinded`](crate::Kinded) variant and
//! derive their names from the variant's kind, so one implementation serves
//! pipelines and tasks alike.

mod name;

pub use name::{NameBlocklist, NameFormat};
