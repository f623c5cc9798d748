// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Documentation page served at `/`
//!
//! Renders a markdown file (the project README by default) into a
//! standalone HTML page.

use pulldown_cmark::{html, Options, Parser};
use std::path::Path;

use super::errors::ApiError;

const PAGE_TITLE: &str = "Chitanka Dictionary API";

const PAGE_STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
            background-color: #f8f9fa;
        }
        .markdown-body {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1, h2, h3 { color: #2c3e50; font-weight: 600; line-height: 1.25; }
        h1, h2 { border-bottom: 1px solid #eaecef; padding-bottom: 8px; }
        pre {
            background: #f6f8fa;
            padding: 16px;
            border-radius: 6px;
            overflow-x: auto;
            border: 1px solid #d0d7de;
        }
        code {
            background: #f6f8fa;
            padding: 0.2em 0.4em;
            border-radius: 3px;
            font-family: 'SFMono-Regular', Consolas, 'Liberation Mono', Menlo, monospace;
            font-size: 85%;
        }
        pre code { background: transparent; padding: 0; }
        a { color: #0969da; text-decoration: none; }
        a:hover { text-decoration: underline; }
        table { border-collapse: collapse; width: 100%; margin: 16px 0; }
        table th, table td { border: 1px solid #d0d7de; padding: 8px 12px; text-align: left; }
        table th { background: #f6f8fa; font-weight: 600; }
"#;

/// Convert markdown to an HTML fragment
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut body = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut body, parser);
    body
}

/// Wrap rendered markdown into the full documentation page
pub fn render_docs_page(markdown: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <div class="markdown-body">
{body}
    </div>
</body>
</html>
"#,
        title = PAGE_TITLE,
        style = PAGE_STYLE,
        body = markdown_to_html(markdown),
    )
}

/// Read and render the documentation file
pub async fn load_docs_page(path: &Path) -> Result<String, ApiError> {
    match tokio::fs::read_to_string(path).await {
        Ok(markdown) => Ok(render_docs_page(&markdown)),
        Err(e) => {
            tracing::error!("Error reading documentation {}: {}", path.display(), e);
            Err(ApiError::DocumentationUnavailable)
        }
    }
}
