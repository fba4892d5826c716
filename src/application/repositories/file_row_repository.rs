use async_trait::async_trait;

use crate::application::{
    dto::file_row_dto::{FileRowDTO, NewFileRowDTO},
    error::ApplicationError,
};

#[async_trait]
pub trait FileRowRepository: Send + Sync {
    /// Registra en la tabla `files` un objeto ya subido al bucket
    ///
    /// # Arguments
    /// * `row` - Nombre, tamaño, tipo MIME y ruta del objeto
    ///
    /// # Returns
    /// La fila creada, con el id asignado por la base de datos
    async fn insert_row(&self, row: NewFileRowDTO) -> Result<FileRowDTO, ApplicationError>;

    /// Lista las filas cuya ruta cuelga de `folder` (todas si es `None`),
    /// de la más reciente a la más antigua
    async fn list_rows(&self, folder: Option<&str>) -> Result<Vec<FileRowDTO>, ApplicationError>;

    /// Elimina una fila
    ///
    /// # Returns
    /// - Ok(()) si la fila existía y fue borrada
    /// - Err(NotFound) si no existe ninguna fila con ese id
    async fn delete_row(&self, id: i64) -> Result<(), ApplicationError>;
}
