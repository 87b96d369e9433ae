pub mod require_identity;

pub use require_identity::RequireIdentity;
