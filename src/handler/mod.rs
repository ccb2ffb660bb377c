pub mod detail;
pub mod health;
pub mod jobs;
pub mod suggest;
