pub mod derive;
pub mod safe;

pub use derive::derive_safe_address;
pub use safe::build_safe_transaction;
