//! Domain services for the WorkoutVibes fitness and nutrition app: accounts,
//! the supplement shop, memberships, diet charts and food-photo analysis.

pub mod accounts;
pub mod analysis;
pub mod auth;
pub mod charts;
pub mod config;
pub mod detector;
pub mod diet;
pub mod error;
pub mod membership;
pub mod models;
pub mod nutrition;
pub mod shop;

pub use error::{ServiceError, ServiceResult};
