//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod registration;
mod seed;

pub use registration::{RegisterUserAccountCommand, RegisterUserAccountHandler, RegistrationResult};
pub use seed::{Seeder, SEED_REFERENCE_USER_SQL};
