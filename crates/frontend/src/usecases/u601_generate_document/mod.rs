//! u601: загрузка JSON-статуса и генерация документа Word.
//!
//! - `model` — ввод/вывод: чтение локального файла и POST в сервис генерации
//! - `view_model` — состояние страницы, редьюсер и конвейер отправки
//! - `view` — Leptos-компонент

pub mod error;
pub mod model;
pub mod view;
pub mod view_model;

pub use error::GenerateError;
pub use view::GenerateDocumentPage;
