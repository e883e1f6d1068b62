use crate::shared::config::Config;
use crate::usecases::u601_generate_document::GenerateDocumentPage;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App(config: Config) -> impl IntoView {
    view! {
        <ConfigProvider>
            <main class="app">
                <GenerateDocumentPage endpoint=config.api.generate_url />
            </main>
        </ConfigProvider>
    }
}
