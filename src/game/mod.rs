pub mod gates;
pub mod scoring;
pub mod standings;
