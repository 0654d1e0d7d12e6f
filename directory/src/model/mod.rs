pub mod event;
pub mod person;
pub mod query;
pub mod results;
