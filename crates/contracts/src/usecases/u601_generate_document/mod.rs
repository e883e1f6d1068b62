pub mod request;
pub mod response;

pub use request::GenerateRequest;
pub use response::{GenerateErrorBody, GenerateResponse};

use crate::usecases::common::UseCaseMetadata;

/// MIME-тип, который принимает форма загрузки
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Имя входного файла, которое ожидает сервис генерации
pub const EXPECTED_INPUT_FILE: &str = "estado_infraestructura.json";

pub struct GenerateDocument;

impl UseCaseMetadata for GenerateDocument {
    fn usecase_index() -> &'static str {
        "u601"
    }

    fn usecase_name() -> &'static str {
        "generate_document"
    }

    fn display_name() -> &'static str {
        "Technical Report Generator"
    }

    fn description() -> &'static str {
        "Upload the infrastructure status file to generate the Word document automatically."
    }
}
