pub mod bands;
pub mod report;
pub mod summary;
