//! Domain models for the Flash Vitrine server.

pub mod product;
pub mod session;
pub mod user;
pub mod vitrine;

pub use product::Product;
pub use session::CurrentUser;
pub use user::User;
pub use vitrine::Vitrine;
