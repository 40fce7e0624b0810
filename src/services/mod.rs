pub mod crawler;
pub mod data_persistance;
pub mod droid;
pub mod landmark_scraper;
pub mod session;

pub use crawler::*;
pub use data_persistance::*;
pub use droid::*;
pub use landmark_scraper::*;
pub use session::*;
