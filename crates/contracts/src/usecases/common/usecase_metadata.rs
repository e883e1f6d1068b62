/// Метаданные UseCase: идентификация страницы и тексты для UI
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u601")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "generate_document")
    fn usecase_name() -> &'static str;

    /// Заголовок страницы
    fn display_name() -> &'static str;

    /// Пояснение под заголовком
    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u601_generate_document"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// DOM id корневого элемента страницы: "{full_name}--usecase"
    fn page_id() -> String {
        format!("{}--usecase", Self::full_name())
    }
}
