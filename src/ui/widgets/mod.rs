pub mod current;
pub mod daily;
pub mod hourly;
pub mod insights;
pub mod prompt;
pub mod shared;
