pub mod file_dto;
pub mod snippet_dto;
