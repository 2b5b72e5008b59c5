pub mod json;
pub mod try_err;
