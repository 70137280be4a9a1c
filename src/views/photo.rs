// ============================================================================
// PHOTO - register a book from photos (route `creat_book`)
// ============================================================================
// Cover -> imprint page -> price page, then a review form. Every step uploads
// one photo; the backend keeps the partial record under `temp_id`. A book
// typed in without any photo is created directly.
// ============================================================================

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::{status_of, Status, TextField};
use crate::context::use_app_context;
use crate::hooks::use_request;
use crate::models::{BookDraft, CreatedBook, ScanImage, ScanKind, ScanResult, ScanSession};
use crate::router::{book_detail_path, RouteProps, ViewFn};

pub fn load() -> ViewFn {
    render
}

pub fn render(_props: &RouteProps) -> Html {
    html! { <Photo /> }
}

async fn read_image(file: web_sys::File) -> Result<ScanImage, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
    Ok(ScanImage {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[function_component(Photo)]
pub fn photo() -> Html {
    let ctx = use_app_context();
    let session = use_state(ScanSession::default);
    let scan = use_request::<ScanResult>();
    let saving = use_request::<CreatedBook>();

    let update = |change: fn(&mut ScanSession)| {
        let session = session.clone();
        move || {
            let mut next = (*session).clone();
            change(&mut next);
            session.set(next);
        }
    };

    let on_file = {
        let session = session.clone();
        let scan = scan.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let picked = input.files().and_then(|files| files.get(0));
            let session = session.clone();
            let Some(file) = picked else {
                let mut next = (*session).clone();
                next.image = None;
                session.set(next);
                return;
            };
            let scan = scan.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut next = (*session).clone();
                match read_image(file).await {
                    Ok(picked) if picked.is_supported() => {
                        scan.reset();
                        next.image = Some(picked);
                    }
                    Ok(picked) => {
                        scan.fail(format!("Only JPEG/PNG photos, got {}", picked.content_type));
                        next.image = None;
                    }
                    Err(message) => scan.fail(message),
                }
                session.set(next);
            });
        })
    };

    let on_upload = {
        let api = ctx.api.clone();
        let session = session.clone();
        let scan = scan.clone();
        Callback::from(move |_: MouseEvent| {
            let current = (*session).clone();
            let (Some(kind), Some(picked)) = (current.step, current.image.clone()) else {
                return;
            };

            let api = api.clone();
            let session = session.clone();
            scan.run(async move {
                let result = api
                    .scan_book(kind, &picked, current.temp_id.as_deref())
                    .await?
                    .json::<ScanResult>()?;

                log::info!("📷 [SCAN] {} recognised, next: {:?}", kind.as_str(), result.next_step);
                let mut next = current;
                next.apply(&result);
                session.set(next);
                Ok(result)
            });
        })
    };

    let on_skip = {
        let skip = update(ScanSession::skip);
        let scan = scan.clone();
        Callback::from(move |_: MouseEvent| {
            scan.reset();
            skip();
        })
    };

    let on_manual = {
        let review = update(ScanSession::review);
        Callback::from(move |_: MouseEvent| review())
    };

    let on_restart = {
        let restart = update(ScanSession::restart);
        let scan = scan.clone();
        let saving = saving.clone();
        Callback::from(move |_: MouseEvent| {
            restart();
            scan.reset();
            saving.reset();
        })
    };

    let edit = |field: fn(&mut BookDraft, String)| {
        let session = session.clone();
        Callback::from(move |value: String| {
            let mut next = (*session).clone();
            field(&mut next.draft, value);
            session.set(next);
        })
    };

    let on_finalize = {
        let api = ctx.api.clone();
        let navigator = ctx.navigator.clone();
        let session = session.clone();
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = &session.draft;
            let missing = draft.missing_fields();
            if !missing.is_empty() {
                saving.fail(format!("Missing: {}", missing.join(", ")));
                return;
            }
            if !draft.has_valid_isbn() {
                saving.fail("ISBN-13 checksum does not match");
                return;
            }

            let api = api.clone();
            let navigator = navigator.clone();
            if session.is_manual() {
                let book = match draft.to_new_book() {
                    Ok(book) => book,
                    Err(message) => return saving.fail(message),
                };
                saving.run(async move {
                    let created = api.create_book(&book).await?.json::<CreatedBook>()?;
                    log::info!("✅ [BOOK] Book {} created manually", created.id);
                    navigator.push(&book_detail_path(&created.id));
                    Ok(created)
                });
            } else {
                let metadata = match draft.to_metadata() {
                    Ok(metadata) => metadata,
                    Err(message) => return saving.fail(message),
                };
                saving.run(async move {
                    let created = api.finalize_book(&metadata).await?.json::<CreatedBook>()?;
                    log::info!("✅ [SCAN] Book {} created", created.id);
                    navigator.push(&book_detail_path(&created.id));
                    Ok(created)
                });
            }
        })
    };

    let (scanning, scan_error) = status_of(scan.state());
    let (finalizing, finalize_error) = status_of(saving.state());
    let draft = &session.draft;

    html! {
        <section class="view photo">
            <h1>{"Register a book"}</h1>
            <ol class="scan-steps">
                { for [ScanKind::Cover, ScanKind::Info, ScanKind::Price].iter().map(|kind| {
                    let current = session.step == Some(*kind);
                    html! { <li class={classes!(current.then_some("current"))}>{ kind.label() }</li> }
                }) }
                <li class={classes!(session.is_reviewing().then_some("current"))}>{"Review"}</li>
            </ol>

            if let Some(kind) = session.step {
                <div class="scan-step">
                    <p>{ format!("Take a photo of the {}", kind.label().to_lowercase()) }</p>
                    <input type="file" accept="image/jpeg,image/png" capture="environment" onchange={on_file} />
                    <button onclick={on_upload} disabled={scanning || session.image.is_none()}>{"Recognise"}</button>
                    <button class="secondary" onclick={on_skip} disabled={scanning}>{"Skip this photo"}</button>
                    <button class="secondary" onclick={on_manual} disabled={scanning}>{"Enter manually"}</button>
                    <Status loading={scanning} error={scan_error} />
                </div>
            } else {
                <form class="book-review" onsubmit={on_finalize}>
                    <TextField label="Title" value={draft.title.clone()} on_change={edit(|d, v| d.title = v)} />
                    <TextField label="Author" value={draft.author.clone()} on_change={edit(|d, v| d.author = v)} />
                    <TextField label="ISBN" value={draft.isbn.clone()} on_change={edit(|d, v| d.isbn = v)} />
                    <TextField
                        label="Price"
                        input_type="number"
                        value={draft.price.clone()}
                        on_change={edit(|d, v| d.price = v)}
                    />
                    <TextField
                        label="Copies"
                        input_type="number"
                        value={draft.total.clone()}
                        on_change={edit(|d, v| d.total = v)}
                    />
                    <button type="submit" disabled={finalizing}>{"Save book"}</button>
                    <Status loading={finalizing} error={finalize_error} />
                </form>
            }
            <button class="secondary" onclick={on_restart}>{"Start over"}</button>
        </section>
    }
}
