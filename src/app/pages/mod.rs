//! Page components, one per view.
//!
//! Pages read entities from the shared [`Stores`](crate::store::Stores)
//! context; the router has already warmed them up by the time a page renders.

mod detail;
mod edit;
mod entities;
mod errors;
mod home;

pub use detail::{StudentDetail, TeacherDetail};
pub use edit::StudentEdit;
pub use entities::{EntityLayout, EntityList, EntitySetting};
pub use errors::{NetworkError, NotFound};
pub use home::{Announcement, Home};
