mod credentials;
mod guard;

pub use credentials::Credentials;
pub use guard::TokenGuard;
