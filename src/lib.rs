pub mod error;
pub mod polynomial;
pub mod script;
pub mod store;

mod ordered_ops;
