use super::model::{BrowserFile, HttpGenerationClient};
use super::view_model::{select_file, submit, GenerateState, StateStore};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u601_generate_document::{GenerateDocument, EXPECTED_INPUT_FILE};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

#[component]
pub fn GenerateDocumentPage(
    /// POST-эндпоинт сервиса генерации
    #[prop(into)]
    endpoint: String,
) -> impl IntoView {
    // web_sys::File не Send, поэтому состояние живёт в локальном хранилище
    let state = RwSignal::new_local(GenerateState::<BrowserFile>::default());
    let client = StoredValue::new(HttpGenerationClient::new(endpoint));

    let is_loading = move || state.with(|s| s.is_loading);

    let on_file_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(BrowserFile::new);
        state.dispatch(select_file(file));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let client = client.get_value();
        spawn_local(async move {
            submit(&state, &client).await;
        });
    };

    view! {
        <PageFrame page_id=GenerateDocument::page_id()>
            <div class="card">
                <div class="card__header">
                    <Flex align=FlexAlign::Center>
                        {icon("document")}
                        <h1 class="section-title">{GenerateDocument::display_name()}</h1>
                    </Flex>
                </div>
                <div class="card__body">
                    <p>
                        {GenerateDocument::description()}
                        " Expected file: "
                        <code>{EXPECTED_INPUT_FILE}</code>
                    </p>

                    {move || state.with(|s| s.error.clone()).map(|e| view! {
                        <div class="flash-error">
                            <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                        </div>
                    })}

                    <form class="upload-form" on:submit=on_submit>
                        <label for="file-upload" class="button button--secondary custom-file-upload">
                            {icon("upload")}
                            " Select File"
                        </label>
                        <input
                            id="file-upload"
                            type="file"
                            name="file"
                            accept=".json"
                            class="hidden"
                            on:change=on_file_change
                        />
                        <span id="file-name" class="file-name-display">
                            {move || state.with(|s| s.file_name.clone())}
                        </span>

                        <button type="submit" class="button button--primary submit-btn" disabled=is_loading>
                            <Show when=is_loading>
                                <Spinner size=SpinnerSize::Small />
                            </Show>
                            {move || if is_loading() { " Generating..." } else { "Generate Document" }}
                        </button>
                    </form>
                </div>
            </div>

            {move || state.with(|s| s.result.clone()).map(|result| view! {
                <div class="card preview-card">
                    <div class="card__header">
                        <h2 class="section-title">"Preview"</h2>
                    </div>
                    <div class="card__body">
                        // Разметка приходит от сервиса генерации и вставляется без экранирования
                        <div class="document-preview" inner_html=result.html_preview></div>
                    </div>
                    {result.download_url.map(|url| view! {
                        <div class="download-container">
                            <a href=url class="button button--primary download-btn" download="">
                                {icon("download")}
                                " Download .DOCX"
                            </a>
                        </div>
                    })}
                </div>
            })}
        </PageFrame>
    }
}
