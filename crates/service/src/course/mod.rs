//! Course catalog: domain types, filter builder, repository, service.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod repo;
pub mod service;

pub use filter::CourseFilter;
pub use service::CourseService;
