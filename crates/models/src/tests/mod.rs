/// CRUD and aggregate-helper tests for all entities (require a database)
pub mod crud_tests;
