pub mod account;
pub mod record;

pub(crate) mod macros;
