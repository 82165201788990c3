//! 詳細表示モーダル

use cafe_finder_common::{DetailInfo, PlaceRecord};
use leptos::prelude::*;

#[component]
pub fn DetailModal(
    selected: Signal<Option<PlaceRecord>>,
    /// メモ編集中の店舗ID
    editing: Signal<Option<String>>,
    on_close: Callback<String>,
    on_edit: Callback<String>,
    on_cancel: Callback<()>,
    on_save: Callback<(String, String)>,
) -> impl IntoView {
    view! {
        {move || {
            selected
                .get()
                .map(|record| {
                    let is_editing = editing.get().as_deref() == Some(record.id.as_str());
                    view! {
                        <DetailCard
                            record=record
                            is_editing=is_editing
                            on_close=on_close
                            on_edit=on_edit
                            on_cancel=on_cancel
                            on_save=on_save
                        />
                    }
                })
        }}
    }
}

#[component]
fn DetailCard(
    record: PlaceRecord,
    is_editing: bool,
    on_close: Callback<String>,
    on_edit: Callback<String>,
    on_cancel: Callback<()>,
    on_save: Callback<(String, String)>,
) -> impl IntoView {
    let close_id = record.id.clone();
    let body = match &record.detail {
        Some(detail) => view! { <DetailBody detail=detail.clone() /> }.into_any(),
        None => view! { <p class="text-muted">"Loading..."</p> }.into_any(),
    };

    view! {
        <div class="modal">
            <div class="modal-header">
                <h2>{record.name.clone()}</h2>
                <button class="btn-close" on:click=move |_| on_close.run(close_id.clone())>"×"</button>
            </div>
            {body}
            <AnnotationEditor
                record=record
                is_editing=is_editing
                on_edit=on_edit
                on_cancel=on_cancel
                on_save=on_save
            />
        </div>
    }
}

#[component]
fn DetailBody(detail: DetailInfo) -> impl IntoView {
    let homepage = match detail.homepage_url() {
        Some(url) => {
            let href = url.to_string();
            view! { <a href=href target="_blank" rel="noopener noreferrer">{url.to_string()}</a> }
                .into_any()
        }
        None => view! { <span>{detail.homepage.clone()}</span> }.into_any(),
    };
    let review = match detail.review_url.clone() {
        Some(url) => view! {
            <a href=url target="_blank" rel="noopener noreferrer">{detail.review_snippet.clone()}</a>
        }
        .into_any(),
        None => view! { <span>{detail.review_snippet.clone()}</span> }.into_any(),
    };

    view! {
        <div class="photos">
            {detail
                .photos
                .iter()
                .map(|src| view! { <img src=src.clone() alt="" loading="lazy" /> })
                .collect_view()}
        </div>
        <dl class="detail-grid">
            <dt>"Address"</dt>
            <dd>{detail.address_line1.clone()}<br />{detail.address_line2.clone()}</dd>
            <dt>"Phone"</dt>
            <dd>{detail.phone.clone()}</dd>
            <dt>"Homepage"</dt>
            <dd>{homepage}</dd>
            <dt>"Price"</dt>
            <dd>{detail.price.clone()}</dd>
            <dt>"Rating"</dt>
            <dd>{detail.rating_text.clone()}</dd>
            <dt>"Status"</dt>
            <dd class="open-status">{detail.open_status.label()}</dd>
            <dt>"Review"</dt>
            <dd class="review">{review}</dd>
        </dl>
    }
}

#[component]
fn AnnotationEditor(
    record: PlaceRecord,
    is_editing: bool,
    on_edit: Callback<String>,
    on_cancel: Callback<()>,
    on_save: Callback<(String, String)>,
) -> impl IntoView {
    let id = record.id.clone();
    let current = record.annotation.clone().unwrap_or_default();

    if !is_editing {
        let label = if record.has_annotation() { "Edit note" } else { "Add note" };
        return view! {
            <div class="annotation">
                {record.annotation.clone().map(|text| view! { <p class="memo">{text}</p> })}
                <button class="btn" on:click=move |_| on_edit.run(id.clone())>{label}</button>
            </div>
        }
        .into_any();
    }

    let (draft, set_draft) = signal(current);
    view! {
        <div class="annotation editing">
            <textarea
                rows="4"
                placeholder="Leave empty to delete the note"
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
            ></textarea>
            <div class="annotation-actions">
                <button class="btn btn-primary" on:click=move |_| on_save.run((id.clone(), draft.get()))>
                    "Save"
                </button>
                <button class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
            </div>
        </div>
    }
    .into_any()
}
