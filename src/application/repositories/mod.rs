pub mod file_row_repository;
pub mod snippet_repository;
