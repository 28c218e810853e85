//! Fragments returned on their own to HTMX requests and embedded in pages.

use service::entry::domain::{Entry, EntryInput, FieldErrors, SearchPage, CONTENT, DESCRIPTION};
use service::render::render_preview;

use super::{ago, html_escape};

/// Values and messages shown in the create/edit form.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub description: String,
    pub content: String,
    pub errors: FieldErrors,
}

impl EntryForm {
    pub fn from_entry(entry: &Entry) -> Self {
        Self { description: entry.description.clone(), content: entry.content.clone(), errors: FieldErrors::new() }
    }

    /// Redisplay a rejected submission.
    pub fn rejected(input: &EntryInput, errors: FieldErrors) -> Self {
        Self { description: input.description().to_string(), content: input.content().to_string(), errors }
    }

    fn error_for(&self, field: &str) -> String {
        match self.errors.get(field) {
            Some(msg) => format!(r#"<p class="field-error">{}</p>"#, html_escape(msg)),
            None => String::new(),
        }
    }
}

pub fn entry_form(action: &str, form: &EntryForm, submit_label: &str) -> String {
    format!(
        r#"<form action="{action}" method="post" class="entry-form">
<label for="description">Description</label>
<input id="description" name="description" type="text" value="{description}">
{description_error}
<label for="content">Content (Markdown)</label>
<textarea id="content" name="content" rows="12">{content}</textarea>
{content_error}
<button type="submit">{submit_label}</button>
</form>"#,
        action = html_escape(action),
        description = html_escape(&form.description),
        description_error = form.error_for(DESCRIPTION),
        content = html_escape(&form.content),
        content_error = form.error_for(CONTENT),
        submit_label = html_escape(submit_label),
    )
}

/// One list item: title link, age label and rendered preview.
pub fn entry_card(entry: &Entry) -> String {
    format!(
        r#"<article class="entry-card">
<h2><a href="/{id}">{description}</a></h2>
<p class="meta">updated {age}</p>
<div class="preview markdown">{preview}</div>
</article>"#,
        id = entry.id,
        description = html_escape(&entry.description),
        age = ago(&entry.updated_at),
        preview = render_preview(&entry.content),
    )
}

pub fn entry_cards(entries: &[Entry]) -> String {
    entries.iter().map(entry_card).collect::<Vec<_>>().join("\n")
}

/// Cards for one search page plus a button that swaps itself for the next page.
pub fn entry_page(page: &SearchPage) -> String {
    let mut out = entry_cards(&page.entries);
    if let Some(next) = page.next_offset() {
        let vals = serde_json::json!({ "query": page.query, "skip": next }).to_string();
        out.push_str(&format!(
            r#"
<button class="load-more" hx-get="/entries" hx-vals="{vals}" hx-target="this" hx-swap="outerHTML">Load more</button>"#,
            vals = html_escape(&vals),
        ));
    }
    if page.entries.is_empty() && page.offset == 0 {
        out.push_str(r#"<p class="empty">No entries found.</p>"#);
    }
    out
}

/// Dropdown under the search box. Nothing is listed until something is typed.
pub fn search_results(entries: &[Entry], has_query: bool) -> String {
    if !has_query {
        return String::new();
    }
    if entries.is_empty() {
        return r#"<p class="search-empty">No matches</p>"#.to_string();
    }
    let items: Vec<String> = entries
        .iter()
        .map(|e| format!(r#"<li><a href="/{}">{}</a></li>"#, e.id, html_escape(&e.description)))
        .collect();
    format!("<ul class=\"search-results\">\n{}\n</ul>", items.join("\n"))
}
