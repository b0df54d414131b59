//! Tag mapping table
//!
//! Declarative registry of the markup emitted for each BoxNote node (and mark) kind. Every entry
//! carries an open template and an optional close template; `{name}` placeholders are filled
//! from the node's attrs, HTML-escaped.
//!
//! | Kind              | Open                                                             | Close             |
//! |-------------------|------------------------------------------------------------------|-------------------|
//! | paragraph         | `<p style="text-align: {alignment}">`                            | `</p>`            |
//! | text              | `<span>`                                                         | `</span>`         |
//! | strong            | `<strong>`                                                       | `</strong>`       |
//! | em                | `<em>`                                                           | `</em>`           |
//! | underline         | `<u>`                                                            | `</u>`            |
//! | strikethrough     | `<s>`                                                            | `</s>`            |
//! | code              | `<code>`                                                         | `</code>`         |
//! | ordered_list      | `<ol>`                                                           | `</ol>`           |
//! | bullet_list       | `<ul>`                                                           | `</ul>`           |
//! | list_item         | `<li>`                                                           | `</li>`           |
//! | blockquote        | `<blockquote>`                                                   | `</blockquote>`   |
//! | call_out_box      | `<blockquote>`                                                   | `</blockquote>`   |
//! | code_block        | `<pre>`                                                          | `</pre>`          |
//! | check_list        | `<ul style="list-style-type:none">`                              | `</ul>`           |
//! | check_list_item   | `<li><input type="checkbox"{checked}>[{marker}] `                | `</li>`           |
//! | table             | `<table>`                                                        | `</table>`        |
//! | table_row         | `<tr>`                                                           | `</tr>`           |
//! | table_cell        | `<td colspan="{colspan}" rowspan="{rowspan}" colwidth="{colwidth}">` | `</td>`       |
//! | table_header      | `<th>`                                                           | `</th>`           |
//! | image             | `<img src="{src}">`                                              |                   |
//! | highlight         | `<mark style="background-color:{color}">`                        | `</mark>`         |
//! | heading           | `<h{level}>`                                                     | `</h{level}>`     |
//! | font_size         | `<span style="font-size:{size}">`                                | `</span>`         |
//! | font_color        | `<span style="color:{color}">`                                   | `</span>`         |
//! | link              | `<a href="{href}">`                                              | `</a>`            |
//! | horizontal_rule   | `<hr>`                                                           |                   |
//!
//! Kinds without an entry render as empty strings.

use log::debug;
use serde_json::{Map, Value};

/// Open/close templates of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDescriptor {
    pub kind: &'static str,
    pub open: &'static str,
    pub close: Option<&'static str>,
}

const fn tag(kind: &'static str, open: &'static str, close: &'static str) -> TagDescriptor {
    TagDescriptor {
        kind,
        open,
        close: Some(close),
    }
}

const fn void(kind: &'static str, open: &'static str) -> TagDescriptor {
    TagDescriptor {
        kind,
        open,
        close: None,
    }
}

pub const TAGS: &[TagDescriptor] = &[
    tag("paragraph", r#"<p style="text-align: {alignment}">"#, "</p>"),
    tag("text", "<span>", "</span>"),
    tag("strong", "<strong>", "</strong>"),
    tag("em", "<em>", "</em>"),
    tag("underline", "<u>", "</u>"),
    tag("strikethrough", "<s>", "</s>"),
    tag("code", "<code>", "</code>"),
    tag("ordered_list", "<ol>", "</ol>"),
    tag("bullet_list", "<ul>", "</ul>"),
    tag("list_item", "<li>", "</li>"),
    tag("blockquote", "<blockquote>", "</blockquote>"),
    tag("call_out_box", "<blockquote>", "</blockquote>"),
    tag("code_block", "<pre>", "</pre>"),
    tag("check_list", r#"<ul style="list-style-type:none">"#, "</ul>"),
    tag(
        "check_list_item",
        r#"<li><input type="checkbox"{checked}>[{marker}] "#,
        "</li>",
    ),
    tag("table", "<table>", "</table>"),
    tag("table_row", "<tr>", "</tr>"),
    tag(
        "table_cell",
        r#"<td colspan="{colspan}" rowspan="{rowspan}" colwidth="{colwidth}">"#,
        "</td>",
    ),
    tag("table_header", "<th>", "</th>"),
    void("image", r#"<img src="{src}">"#),
    tag(
        "highlight",
        r#"<mark style="background-color:{color}">"#,
        "</mark>",
    ),
    tag("heading", "<h{level}>", "</h{level}>"),
    tag("font_size", r#"<span style="font-size:{size}">"#, "</span>"),
    tag("font_color", r#"<span style="color:{color}">"#, "</span>"),
    tag("link", r#"<a href="{href}">"#, "</a>"),
    void("horizontal_rule", "<hr>"),
];

pub fn descriptor(kind: &str) -> Option<&'static TagDescriptor> {
    TAGS.iter().find(|descriptor| descriptor.kind == kind)
}

/// Render the open template of `kind` with `params`; unknown kinds render empty.
pub fn open_tag(kind: &str, params: &Map<String, Value>) -> String {
    descriptor(kind)
        .map(|descriptor| fill(kind, descriptor.open, params))
        .unwrap_or_default()
}

/// Render the close template of `kind` with `params`; unknown and void kinds render empty.
pub fn close_tag(kind: &str, params: &Map<String, Value>) -> String {
    descriptor(kind)
        .and_then(|descriptor| descriptor.close)
        .map(|template| fill(kind, template, params))
        .unwrap_or_default()
}

fn fill(kind: &str, template: &str, params: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match params.get(name) {
            Some(value) => out.push_str(&escape_html(&render_value(value))),
            None => debug!("{kind}: no value for template parameter '{name}'"),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Plain-text rendering of an attribute value.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(_) => value.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// The stylesheet embedded in every converted note.
pub fn base_stylesheet() -> &'static str {
    include_str!("../../../css/base.css")
}
