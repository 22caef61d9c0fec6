pub mod catalog;
pub mod generator;
pub mod pipeline;
pub mod scoring;
