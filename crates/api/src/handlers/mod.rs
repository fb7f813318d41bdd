pub mod category;
pub mod expense;
pub mod investment;
pub mod investor;
pub mod project;
pub mod sale;
