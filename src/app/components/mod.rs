//! Shared UI components.

pub mod layout;
pub mod link;
pub mod nav;
pub mod progress_bar;

pub use layout::Layout;
pub use link::Link;
pub use nav::Nav;
pub use progress_bar::ProgressBar;
