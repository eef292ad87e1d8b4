//! Core traits shared by models and services

/// Primary key type for projects and payments
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}
