// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Standardized BBCode text block
//!
//! Every source renders the same layout: optional poster, a fixed
//! `【基本信息】` section listing only the fields that are present, the item
//! link, and an optional synopsis section.

use serde_json::{Map, Value};

use crate::sources::NormalizedRecord;

const POSTER_TEMPLATE: &str = "[img]{{poster}}[/img]\n\n";
const INFO_HEADER: &str = "【基本信息】\n";
const LINK_TEMPLATE: &str = "链接: [url={{link}}]{{link}}[/url]\n";
const SYNOPSIS_TEMPLATE: &str = "\n【简介】\n{{description}}\n";

/// Info lines in display order, each emitted only when its field is present
const INFO_LINES: &[(&str, &str)] = &[
    ("title", "标题: {{title}}\n"),
    ("date_published", "上映日期: {{date_published}}\n"),
    ("genre", "类型: {{genre}}\n"),
    ("rating", "评分: {{rating}}/10\n"),
    ("director", "导演: {{director}}\n"),
    ("actors", "演员: {{actors}}\n"),
];

/// Render the text block for a record
pub fn render_text_block(record: &NormalizedRecord) -> String {
    let mut data = record.fields().clone();
    data.insert("link".to_string(), Value::from(record.link()));

    let mut block = String::new();
    if has_value(&data, "poster") {
        block.push_str(&fill_template(POSTER_TEMPLATE, &data));
    }

    block.push_str(INFO_HEADER);
    for (key, template) in INFO_LINES {
        if has_value(&data, key) {
            block.push_str(&fill_template(template, &data));
        }
    }
    block.push_str(&fill_template(LINK_TEMPLATE, &data));

    if has_value(&data, "description") {
        block.push_str(&fill_template(SYNOPSIS_TEMPLATE, &data));
    }

    block
}

/// Replace every `{{key}}` placeholder whose key is in `data`
///
/// Null values render as the empty string, strings render raw and anything
/// else renders as compact JSON. Placeholders naming unknown keys are left
/// untouched. Substituted values are never re-scanned.
pub fn fill_template(template: &str, data: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };

        out.push_str(&rest[..start]);
        let key = &after_open[..end];
        match data.get(key) {
            Some(value) => out.push_str(&stringify(value)),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Only null is blank; `false` and `0` are data and render as such
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn has_value(data: &Map<String, Value>, key: &str) -> bool {
    match data.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
