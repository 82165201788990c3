//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(
    locality: Signal<String>,
    filter_query: Signal<String>,
    top_rated_only: Signal<bool>,
    on_filter: Callback<String>,
    on_toggle_top_rated: Callback<()>,
) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Cafe Finder"</h1>
            <p class="locality">{move || format!("Coffee near {}", locality.get())}</p>

            <div class="filters">
                <input
                    type="search"
                    id="filter"
                    placeholder="Filter by name..."
                    prop:value=move || filter_query.get()
                    on:input=move |ev| on_filter.run(event_target_value(&ev))
                />
                <button
                    class="btn"
                    class:active=move || top_rated_only.get()
                    on:click=move |_| on_toggle_top_rated.run(())
                >
                    "★ Top rated"
                </button>
            </div>
        </header>
    }
}
