//! Server-rendered HTML.
//!
//! Every value interpolated into markup goes through [`html_escape`]; the only
//! unescaped fragments are the Markdown renderer's output and other views.

mod humanize;
pub mod pages;
pub mod partials;

pub use humanize::{ago, humanize};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Escapes HTML special characters in a user-supplied string.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full document around `body`.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Gist</title>
<link rel="stylesheet" href="/static/style.css">
<script src="{HTMX_SRC}"></script>
</head>
<body>
<header class="site-header"><a href="/" class="brand">Gist</a>
<form action="/entries" method="get" class="search-form">
<input type="search" name="query" placeholder="Search entries" aria-label="Search entries">
</form>
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = html_escape(title),
    )
}
