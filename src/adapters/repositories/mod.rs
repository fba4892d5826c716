mod pg_file_row_repository;
mod pg_snippet_repository;

pub use pg_file_row_repository::PgFileRowRepository;
pub use pg_snippet_repository::PgSnippetRepository;
