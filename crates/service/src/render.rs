//! Markdown rendering for entry content.
//!
//! Both functions are pure: the same content always renders to the same HTML.
//! Entries are written by anonymous visitors, so raw HTML in the Markdown is
//! shown as escaped text and `javascript:` links lose their target.

use pulldown_cmark::{html as md_html, CowStr, Event, Options, Parser, Tag};

/// Characters of content shown in list views.
pub const PREVIEW_CHARS: usize = 250;

const FENCE: &str = "```";

/// Converts CommonMark (with fenced code blocks, tables and strikethrough) to HTML.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(text, options).map(neutralize);
    let mut html_output = String::new();
    md_html::push_html(&mut html_output, parser);
    html_output
}

fn neutralize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) if is_script_url(&dest_url) => {
            Event::Start(Tag::Link { link_type, dest_url: CowStr::Borrowed("#"), title, id })
        }
        other => other,
    }
}

fn is_script_url(url: &str) -> bool {
    let scheme: String = url.trim_start().chars().take(11).collect::<String>().to_ascii_lowercase();
    scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") || scheme.starts_with("data:")
}

/// First `max_chars` characters of `text`. If the cut leaves a fenced code
/// block open, a closing fence is appended so the preview renders as a
/// complete block.
pub fn truncate_markdown(text: &str, max_chars: usize) -> String {
    let mut truncated: String = text.chars().take(max_chars).collect();
    let fences = truncated
        .lines()
        .filter(|line| line.trim_start().starts_with(FENCE))
        .count();
    if fences % 2 == 1 {
        truncated.push('\n');
        truncated.push_str(FENCE);
    }
    truncated
}

/// HTML for the list-view preview of an entry.
pub fn render_preview(text: &str) -> String {
    render_markdown(&truncate_markdown(text, PREVIEW_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_code_block(len: usize) -> String {
        let mut s = String::from("```rust\n");
        while s.chars().count() < len {
            s.push_str("let x = 1;\n");
        }
        s.chars().take(len).collect()
    }

    #[test]
    fn renders_fenced_code() {
        let html = render_markdown("```\nfn main() {}\n```");
        assert!(html.contains("<pre><code>fn main() {}"), "{html}");
    }

    #[test]
    fn renders_headings_and_tables() {
        let html = render_markdown("# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>\n\nhi <img src=x onerror=alert(1)>");
        assert!(!html.contains("<script>"), "{html}");
        assert!(!html.contains("<img"), "{html}");
        assert!(html.contains("&lt;script&gt;"), "{html}");
    }

    #[test]
    fn script_links_are_defused() {
        let html = render_markdown("[click](javascript:alert(1)) and [ok](https://example.com)");
        assert!(!html.contains("javascript:"), "{html}");
        assert!(html.contains(r##"<a href="#">click</a>"##), "{html}");
        assert!(html.contains(r#"href="https://example.com""#), "{html}");
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_markdown("hello", PREVIEW_CHARS), "hello");
        assert_eq!(truncate_markdown("```\ncode\n```\n", PREVIEW_CHARS), "```\ncode\n```\n");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(300);
        let cut = truncate_markdown(&text, PREVIEW_CHARS);
        assert_eq!(cut.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn truncated_open_fence_is_closed() {
        let content = open_code_block(300);
        assert_eq!(content.chars().count(), 300);

        let cut = truncate_markdown(&content, PREVIEW_CHARS);
        assert!(cut.ends_with("\n```"));

        let html = render_preview(&content);
        assert!(html.contains("<pre><code class=\"language-rust\">"), "{html}");
        assert!(html.trim_end().ends_with("</code></pre>"), "{html}");
        assert!(!html.contains("```"), "{html}");
    }

    #[test]
    fn preview_is_idempotent() {
        let content = open_code_block(300);
        assert_eq!(render_preview(&content), render_preview(&content));
        let cut = truncate_markdown(&content, PREVIEW_CHARS);
        assert_eq!(truncate_markdown(&cut, cut.chars().count()), cut);
    }

    #[test]
    fn closed_block_followed_by_open_block_gets_one_fence() {
        let text = "```\na\n```\n\ntext\n\n```\nb";
        let cut = truncate_markdown(text, PREVIEW_CHARS);
        assert_eq!(cut, format!("{text}\n```"));
    }
}
