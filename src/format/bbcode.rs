// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML → BBCode conversion for scraped descriptions

use scraper::{ElementRef, Html};

/// Convert an HTML fragment into BBCode
///
/// Handles the markup catalog sites put in synopses: line breaks,
/// paragraphs, emphasis, links and images. Unknown tags are unwrapped and
/// `script`/`style` contents are dropped. Entities are decoded by the parser.
pub fn html_to_bbcode(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    render_children(fragment.root_element(), &mut out);
    collapse_blank_lines(out.trim())
}

fn render_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            render_element(child_element, out);
        }
    }
}

fn render_element(element: ElementRef<'_>, out: &mut String) {
    let tag = element.value().name();
    match tag {
        "script" | "style" => {}
        "br" => out.push('\n'),
        "p" | "div" => {
            render_children(element, out);
            out.push('\n');
        }
        "b" | "strong" => wrap(element, "[b]", "[/b]", out),
        "i" | "em" => wrap(element, "[i]", "[/i]", out),
        "u" => wrap(element, "[u]", "[/u]", out),
        "a" => match element.value().attr("href") {
            Some(href) => wrap(element, &format!("[url={}]", href), "[/url]", out),
            None => render_children(element, out),
        },
        "img" => {
            if let Some(src) = element.value().attr("src") {
                out.push_str(&format!("[img]{}[/img]", src));
            }
        }
        _ => render_children(element, out),
    }
}

fn wrap(element: ElementRef<'_>, open: &str, close: &str, out: &mut String) {
    out.push_str(open);
    render_children(element, out);
    out.push_str(close);
}

/// Collapse runs of three or more newlines down to one blank line
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(c);
    }
    out
}
