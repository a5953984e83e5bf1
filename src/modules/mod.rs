pub mod catalog;
pub mod matcher;
pub mod report;
pub mod tracker;
