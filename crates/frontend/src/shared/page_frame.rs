//! PageFrame — корневая обёртка страницы.
//!
//! Ставит `id` вида `"{usecase}--usecase"`, чтобы страницу можно было найти
//! в DOM Inspector и сразу перейти к модулю `usecases/{usecase}/`.

use leptos::prelude::*;

pub const PAGE_CAT_USECASE: &str = "usecase";

#[component]
pub fn PageFrame(
    /// HTML id, e.g. `"u601_generate_document--usecase"`
    #[prop(into)]
    page_id: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            id=page_id
            class="page page--usecase"
            data-page-category=PAGE_CAT_USECASE
        >
            {children()}
        </div>
    }
}
