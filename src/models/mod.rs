pub mod banner;
pub mod errors;
pub mod options;
