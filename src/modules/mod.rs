pub mod admin;
pub mod health;
pub mod me;
pub mod zoom;

pub use self::zoom::model::SignatureRequest;
