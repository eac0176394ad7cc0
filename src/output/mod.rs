pub mod encode;
pub mod manifest;
pub mod writer;
