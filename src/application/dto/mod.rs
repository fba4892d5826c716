pub mod file_row_dto;
pub mod snippet_dto;
