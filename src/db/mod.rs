//! Relational persistence layer for the leaderboard.

mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use repository::DieselRepository;
