pub mod landmark;
pub mod site_layout;

pub use landmark::*;
pub use site_layout::*;
