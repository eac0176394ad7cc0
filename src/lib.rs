pub mod config;
pub mod error;
pub mod output;
pub mod paginate;
pub mod pipeline;
pub mod render;
