//! XML serialization for StockItem documents.
//!
//! Output is fixed: a declaration naming UTF-8, then a compact
//! `<stockItem><item>...</item></stockItem>` tree with one leaf per field.

pub mod reader;

use crate::record::StockItem;

pub const DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>\n";
pub const ROOT_TAG: &str = "stockItem";
pub const ITEM_TAG: &str = "item";

/// Rendered documents are ~400 bytes; this avoids regrowing the buffer.
const RENDER_CAPACITY: usize = 512;

/// Serialize a record to the complete document text.
pub fn render(item: &StockItem) -> String {
    let mut out = String::with_capacity(RENDER_CAPACITY);
    out.push_str(DECLARATION);
    open_tag(&mut out, ROOT_TAG);
    open_tag(&mut out, ITEM_TAG);
    for (tag, value) in item.fields() {
        open_tag(&mut out, tag);
        out.push_str(&escape_text(value));
        close_tag(&mut out, tag);
    }
    close_tag(&mut out, ITEM_TAG);
    close_tag(&mut out, ROOT_TAG);
    out
}

/// Escape a string for use as element text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn open_tag(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
