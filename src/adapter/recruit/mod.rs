pub mod client;

pub use client::{RecruitApiClient, RecruitApiConfig};
