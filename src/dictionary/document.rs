// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Small query layer over a parsed HTML document
//!
//! The entry parser only needs a handful of structural lookups: first element
//! by id prefix, elements under a class path, text content and attributes.
//! Keeping them here leaves the parser independent of the HTML library.

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document
pub struct Document {
    html: Html,
}

/// An element inside a [`Document`]
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Invalid selector {:?}: {:?}", css, e);
            None
        }
    }
}

impl Document {
    /// Parse an HTML page
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element matching a CSS selector
    pub fn select_first(&self, css: &str) -> Option<Element<'_>> {
        let selector = parse_selector(css)?;
        self.html
            .select(&selector)
            .next()
            .map(|inner| Element { inner })
    }

    /// First element whose `id` attribute starts with `prefix`
    pub fn first_by_id_prefix(&self, prefix: &str) -> Option<Element<'_>> {
        let escaped = prefix.replace('\\', "\\\\").replace('\'', "\\'");
        self.select_first(&format!("[id^='{}']", escaped))
    }

    /// All elements matching a descendant path such as `[".links", ".data", "li"]`
    pub fn select_path(&self, path: &[&str]) -> Vec<Element<'_>> {
        let Some(selector) = parse_selector(&path.join(" ")) else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .map(|inner| Element { inner })
            .collect()
    }

    /// Concatenated, trimmed text of every element on a descendant path
    pub fn path_text(&self, path: &[&str]) -> String {
        self.select_path(path)
            .iter()
            .map(|el| el.raw_text())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl<'a> Element<'a> {
    /// Trimmed text content of the element and its descendants
    pub fn text(&self) -> String {
        self.raw_text().trim().to_string()
    }

    fn raw_text(&self) -> String {
        self.inner.text().collect()
    }

    /// Attribute value, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// First descendant matching a CSS selector
    pub fn find_first(&self, css: &str) -> Option<Element<'a>> {
        let selector = parse_selector(css)?;
        self.inner
            .select(&selector)
            .next()
            .map(|inner| Element { inner })
    }
}
