pub mod cli;
pub mod dictionary;
pub mod driver;
pub mod models;
pub mod pipeline;
pub mod streams;
