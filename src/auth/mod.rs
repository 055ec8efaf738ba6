pub mod claims;
pub mod extractors;
pub mod jwt;
pub mod utils;

pub use claims::Claims;
pub use extractors::{AuthenticatedUser, OptionalPlayer};
pub use jwt::JwtService;
pub use utils::require_admin;
