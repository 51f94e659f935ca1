pub mod cookie;
pub mod password;
pub mod principal;
pub mod session;

pub use principal::Principal;
