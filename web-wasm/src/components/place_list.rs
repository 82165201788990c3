//! 店舗一覧コンポーネント

use cafe_finder_common::PlaceRecord;
use leptos::prelude::*;

#[component]
pub fn PlaceList(
    records: Signal<Vec<PlaceRecord>>,
    no_match: Signal<bool>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <aside class="place-list">
            <Show
                when=move || !no_match.get()
                fallback=|| view! { <p class="text-muted">"No matches found"</p> }
            >
                <ul>
                    <For
                        each=move || records.get()
                        key=|record| (record.id.clone(), record.is_selected, record.has_annotation())
                        let:record
                    >
                        <PlaceItem record=record on_select=on_select />
                    </For>
                </ul>
            </Show>
        </aside>
    }
}

#[component]
fn PlaceItem(record: PlaceRecord, on_select: Callback<String>) -> impl IntoView {
    let id = record.id.clone();
    view! {
        <li
            class="place-item"
            class:selected=record.is_selected
            class:top-rated=record.is_top_rated
            on:click=move |_| on_select.run(id.clone())
        >
            <span class="place-name">{record.name.clone()}</span>
            {record.is_top_rated.then(|| view! { <span class="badge star">"★"</span> })}
            {record.has_annotation().then(|| view! { <span class="badge memo" title="Has a note">"✎"</span> })}
        </li>
    }
}
