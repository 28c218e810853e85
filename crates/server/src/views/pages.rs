use service::entry::domain::{Entry, SearchPage};
use service::render::render_markdown;

use super::partials::{entry_cards, entry_form, entry_page, EntryForm};
use super::{ago, html_escape, layout};

const AUTOCOMPLETE_BOX: &str = r##"<div class="autocomplete">
<input type="search" name="query" placeholder="Jump to an entry" aria-label="Jump to an entry"
  hx-get="/entries/autocomplete" hx-trigger="keyup changed delay:300ms, search" hx-target="#search-results">
<div id="search-results"></div>
</div>"##;

/// Home page: quick search, the most recent entries and the create form.
pub fn index(recent: &[Entry], form: &EntryForm) -> String {
    let body = format!(
        r#"{AUTOCOMPLETE_BOX}
<section class="recent">
<h1>Recent entries</h1>
{cards}
<p><a href="/entries">All entries</a></p>
</section>
<section class="create">
<h1>New entry</h1>
{form}
</section>"#,
        cards = entry_cards(recent),
        form = entry_form("/entries", form, "Create"),
    );
    layout("Home", &body)
}

pub fn entries(page: &SearchPage) -> String {
    let heading = if page.query.is_empty() {
        "All entries".to_string()
    } else {
        format!("Results for “{}”", html_escape(&page.query))
    };
    let body = format!(
        r#"<h1>{heading}</h1>
<div id="entries">
{list}
</div>"#,
        list = entry_page(page),
    );
    layout("Entries", &body)
}

pub fn show(entry: &Entry) -> String {
    let body = format!(
        r#"<article class="entry">
<h1>{description}</h1>
<p class="meta">created {created} · updated {updated}</p>
<div class="markdown">{content}</div>
<nav class="actions">
<a href="/{id}/edit">Edit</a>
<button hx-delete="/{id}" hx-confirm="Delete this entry?">Delete</button>
</nav>
</article>"#,
        id = entry.id,
        description = html_escape(&entry.description),
        created = ago(&entry.created_at),
        updated = ago(&entry.updated_at),
        content = render_markdown(&entry.content),
    );
    layout(&entry.description, &body)
}

pub fn edit(id: i32, form: &EntryForm) -> String {
    let body = format!(
        r#"<h1>Edit entry</h1>
{form}
<p><a href="/{id}">Cancel</a></p>"#,
        form = entry_form(&format!("/{id}/update"), form, "Save"),
    );
    layout("Edit entry", &body)
}

pub fn not_found() -> String {
    layout(
        "Not found",
        r#"<h1>Not found</h1>
<p>There is nothing here. <a href="/">Back to the start</a>.</p>"#,
    )
}

/// Generic failure page; `detail` is printed when given.
pub fn error(title: &str, detail: Option<&str>) -> String {
    let detail = detail
        .map(|d| format!(r#"<pre class="error-detail">{}</pre>"#, html_escape(d)))
        .unwrap_or_default();
    let body = format!("<h1>{}</h1>\n{detail}", html_escape(title));
    layout(title, &body)
}
