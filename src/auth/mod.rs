pub mod extractor;
pub mod jwt;
pub mod password;
pub mod role;

pub use extractor::AuthUser;
pub use role::{Capability, Role};
