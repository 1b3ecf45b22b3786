pub mod client;
pub mod repositories;
pub mod repository;
pub mod table_names;
