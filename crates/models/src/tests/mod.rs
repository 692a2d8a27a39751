/// Entity CRUD against an in-memory SQLite database
pub mod crud_tests;
