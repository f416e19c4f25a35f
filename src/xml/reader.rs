//! Minimal reader for StockItem documents.
//!
//! Understands the subset of XML the generator writes: a declaration, a
//! `<stockItem>` root, any number of `<item>` children and flat text leaves.
//! Comments, processing instructions and whitespace between tags are skipped;
//! CDATA sections are read as literal text.
//! Attributes are tolerated and ignored.

use memchr::{memchr, memmem};

use super::{ITEM_TAG, ROOT_TAG};

/// Ordered `(tag, text)` leaves of one `<item>`.
pub type ItemFields = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open(&'a str),
    Close(&'a str),
    Empty(&'a str),
    Text(&'a str),
    CData(&'a str),
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_token(&mut self) -> anyhow::Result<Option<Token<'a>>> {
        let input = self.input;
        loop {
            let rest = &input[self.pos..];
            if rest.is_empty() {
                return Ok(None);
            }

            if !rest.starts_with('<') {
                let end = memchr(b'<', rest.as_bytes()).unwrap_or(rest.len());
                self.pos += end;
                return Ok(Some(Token::Text(&rest[..end])));
            }

            if rest.starts_with("<?") {
                self.skip_past(rest, "?>", "processing instruction")?;
                continue;
            }
            if let Some(body) = rest.strip_prefix("<![CDATA[") {
                let Some(end) = memmem::find(body.as_bytes(), b"]]>") else {
                    anyhow::bail!("unterminated CDATA section in document");
                };
                self.pos += "<![CDATA[".len() + end + "]]>".len();
                return Ok(Some(Token::CData(&body[..end])));
            }
            if rest.starts_with("<!--") {
                self.skip_past(rest, "-->", "comment")?;
                continue;
            }
            if rest.starts_with("<!") {
                self.skip_past(rest, ">", "declaration")?;
                continue;
            }

            let Some(gt) = memchr(b'>', rest.as_bytes()) else {
                anyhow::bail!("unexpected end of document inside a tag");
            };
            self.pos += gt + 1;
            let body = &rest[1..gt];

            if let Some(name) = body.strip_prefix('/') {
                return Ok(Some(Token::Close(name.trim())));
            }
            if let Some(inner) = body.strip_suffix('/') {
                return Ok(Some(Token::Empty(tag_name(inner)?)));
            }
            return Ok(Some(Token::Open(tag_name(body)?)));
        }
    }

    fn skip_past(&mut self, rest: &str, terminator: &str, what: &str) -> anyhow::Result<()> {
        match memmem::find(rest.as_bytes(), terminator.as_bytes()) {
            Some(idx) => {
                self.pos += idx + terminator.len();
                Ok(())
            }
            None => anyhow::bail!("unterminated {} in document", what),
        }
    }
}

fn tag_name(body: &str) -> anyhow::Result<&str> {
    let name = body.split_whitespace().next().unwrap_or("");
    if name.is_empty() {
        anyhow::bail!("empty tag name");
    }
    Ok(name)
}

/// Read every `<item>` of a document as ordered leaf pairs.
pub fn read_items(input: &str) -> anyhow::Result<Vec<ItemFields>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut tokens = Tokenizer::new(input);

    loop {
        match tokens.next_token()? {
            Some(Token::Text(text)) if text.trim().is_empty() => continue,
            Some(Token::Open(ROOT_TAG)) => break,
            Some(Token::Empty(ROOT_TAG)) => return Ok(Vec::new()),
            Some(Token::Open(other)) | Some(Token::Empty(other)) => {
                anyhow::bail!("expected root element <{}>, found <{}>", ROOT_TAG, other)
            }
            Some(_) => anyhow::bail!("unexpected content before <{}>", ROOT_TAG),
            None => anyhow::bail!("document has no <{}> root element", ROOT_TAG),
        }
    }

    let mut items = Vec::new();
    loop {
        match tokens.next_token()? {
            Some(Token::Open(ITEM_TAG)) => items.push(read_item(&mut tokens)?),
            Some(Token::Open(other)) => skip_element(&mut tokens, other)?,
            Some(Token::Close(ROOT_TAG)) => return Ok(items),
            Some(Token::Close(other)) => {
                anyhow::bail!("mismatched </{}> inside <{}>", other, ROOT_TAG)
            }
            Some(Token::Text(_)) | Some(Token::CData(_)) | Some(Token::Empty(_)) => continue,
            None => anyhow::bail!("unexpected end of document: <{}> not closed", ROOT_TAG),
        }
    }
}

fn read_item(tokens: &mut Tokenizer<'_>) -> anyhow::Result<ItemFields> {
    let mut fields = Vec::new();
    loop {
        match tokens.next_token()? {
            Some(Token::Open(tag)) => {
                let text = read_leaf_text(tokens, tag)?;
                fields.push((tag.to_string(), text));
            }
            Some(Token::Empty(tag)) => fields.push((tag.to_string(), String::new())),
            Some(Token::Close(ITEM_TAG)) => return Ok(fields),
            Some(Token::Close(other)) => {
                anyhow::bail!("mismatched </{}> inside <{}>", other, ITEM_TAG)
            }
            Some(Token::Text(_)) | Some(Token::CData(_)) => continue,
            None => anyhow::bail!("unexpected end of document: <{}> not closed", ITEM_TAG),
        }
    }
}

/// Collect the direct text of a leaf; nested elements are skipped.
fn read_leaf_text(tokens: &mut Tokenizer<'_>, tag: &str) -> anyhow::Result<String> {
    let mut text = String::new();
    loop {
        match tokens.next_token()? {
            Some(Token::Text(chunk)) => text.push_str(&unescape(chunk)?),
            Some(Token::CData(raw)) => text.push_str(raw),
            Some(Token::Open(inner)) => skip_element(tokens, inner)?,
            Some(Token::Empty(_)) => {}
            Some(Token::Close(name)) if name == tag => return Ok(text),
            Some(Token::Close(name)) => anyhow::bail!("mismatched </{}> inside <{}>", name, tag),
            None => anyhow::bail!("unexpected end of document: <{}> not closed", tag),
        }
    }
}

fn skip_element(tokens: &mut Tokenizer<'_>, tag: &str) -> anyhow::Result<()> {
    let mut depth = 1usize;
    while depth > 0 {
        match tokens.next_token()? {
            Some(Token::Open(_)) => depth += 1,
            Some(Token::Close(_)) => depth -= 1,
            Some(_) => {}
            None => anyhow::bail!("unexpected end of document: <{}> not closed", tag),
        }
    }
    Ok(())
}

/// Decode the predefined and numeric character references.
pub fn unescape(s: &str) -> anyhow::Result<String> {
    if !s.contains('&') {
        return Ok(s.to_string());
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let Some(semi) = after.find(';') else {
            anyhow::bail!("unterminated entity reference in '{}'", s);
        };
        let entity = &after[..semi];
        let decoded = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => decode_char_ref(entity)
                .ok_or_else(|| anyhow::anyhow!("unknown entity '&{};'", entity))?,
        };
        out.push(decoded);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn decode_char_ref(entity: &str) -> Option<char> {
    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Distinct leaf tag names across all items, in first-seen order.
pub fn field_names(items: &[ItemFields]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (tag, _) in items.iter().flatten() {
        if !names.iter().any(|n| n == tag) {
            names.push(tag.clone());
        }
    }
    names
}
