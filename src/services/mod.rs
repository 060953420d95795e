//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod access_control;
mod auth_service;
mod catalog_service;
pub mod container;
mod user_service;
mod workout_service;

#[cfg(test)]
mod testing;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use access_control::{authenticate, Authorized, Identity, WorkoutAccess};
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use catalog_service::{CatalogManager, CatalogService};
pub use user_service::{UserManager, UserService};
pub use workout_service::{RequestBody, WorkoutManager, WorkoutService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
