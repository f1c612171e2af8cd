pub mod errors;
pub mod db;
pub mod course;
pub mod enrollment;
