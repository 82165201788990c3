//! エラーバナー

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(message: ReadSignal<Option<String>>, on_dismiss: Callback<()>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="error-banner" role="alert">
                <span>{move || message.get().unwrap_or_default()}</span>
                <button class="btn-close" on:click=move |_| on_dismiss.run(())>"×"</button>
            </div>
        </Show>
    }
}
