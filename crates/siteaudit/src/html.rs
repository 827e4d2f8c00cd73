//! Minimal HTML tag scanner
//!
//! The detectors only need tag names, attributes, and a rough visible-text
//! length, so this walks the markup directly instead of building a DOM.
//! Malformed markup degrades to "no tags found", never to an error.

/// A single scanned tag
#[derive(Debug, Clone)]
pub(crate) struct Tag {
    /// Tag name, lowercased
    pub name: String,
    /// True for closing tags (`</p>`)
    pub closing: bool,
    /// Attribute name/value pairs; names lowercased, values verbatim
    pub attrs: Vec<(String, String)>,
}

impl Tag {
    /// Look up an attribute value by (case-insensitive) name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if the attribute is present, valued or not
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }
}

/// Scan all tags in a document
pub(crate) fn scan_tags(html: &str) -> Vec<Tag> {
    let mut tags = Vec::new();
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            continue;
        }

        // Comments and doctype declarations carry no signal
        if chars.peek() == Some(&'!') {
            chars.next();
            if chars.peek() == Some(&'-') {
                skip_comment(&mut chars);
            } else {
                skip_until(&mut chars, '>');
            }
            continue;
        }

        let raw = read_raw_tag(&mut chars);
        if let Some(tag) = parse_tag(&raw) {
            tags.push(tag);
        }
    }

    tags
}

/// Length of the visible text, whitespace-collapsed
///
/// Approximates what a text-mode rendering of the page would show:
/// script/style/noscript/iframe/svg contents are skipped and runs of
/// whitespace count as a single space.
pub(crate) fn visible_text_len(html: &str) -> usize {
    const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "svg"];

    let mut len = 0usize;
    let mut skip_stack: Vec<String> = Vec::new();
    let mut pending_space = false;
    let mut emitted_any = false;
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            if chars.peek() == Some(&'!') {
                chars.next();
                if chars.peek() == Some(&'-') {
                    skip_comment(&mut chars);
                } else {
                    skip_until(&mut chars, '>');
                }
                continue;
            }

            let raw = read_raw_tag(&mut chars);
            let Some(tag) = parse_tag(&raw) else { continue };

            if SKIP_TAGS.contains(&tag.name.as_str()) {
                if tag.closing {
                    if let Some(pos) = skip_stack.iter().rposition(|t| *t == tag.name) {
                        skip_stack.remove(pos);
                    }
                } else if !raw.trim_end().ends_with('/') {
                    skip_stack.push(tag.name.clone());
                }
            }
            continue;
        }

        if !skip_stack.is_empty() {
            continue;
        }

        if c.is_whitespace() {
            pending_space = emitted_any;
        } else {
            if pending_space {
                len += 1;
                pending_space = false;
            }
            len += 1;
            emitted_any = true;
        }
    }

    len
}

/// Read the raw inside of a tag up to the closing '>', honoring quotes
fn read_raw_tag(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut raw = String::new();
    let mut quote: Option<char> = None;

    for c in chars.by_ref() {
        match quote {
            Some(q) => {
                raw.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c == '>' {
                    break;
                }
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                raw.push(c);
            }
        }
    }

    raw
}

/// Parse the raw tag content into name and attributes
fn parse_tag(raw: &str) -> Option<Tag> {
    let mut rest = raw.trim();
    let closing = rest.starts_with('/');
    if closing {
        rest = rest[1..].trim_start();
    }

    let name_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(rest.len());
    if name_end == 0 {
        return None;
    }
    let name = rest[..name_end].to_lowercase();
    let mut attrs = Vec::new();

    if !closing {
        parse_attrs(&rest[name_end..], &mut attrs);
    }

    Some(Tag {
        name,
        closing,
        attrs,
    })
}

/// Parse `name`, `name=value`, `name="value"` attribute forms
fn parse_attrs(input: &str, attrs: &mut Vec<(String, String)>) {
    let mut chars = input.chars().peekable();

    loop {
        // Skip whitespace and stray slashes
        while matches!(chars.peek(), Some(c) if c.is_whitespace() || *c == '/') {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '=' || c == '/' {
                break;
            }
            name.push(c);
            chars.next();
        }
        if name.is_empty() {
            chars.next();
            continue;
        }

        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }

        let mut value = String::new();
        if chars.peek() == Some(&'=') {
            chars.next();
            while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
                chars.next();
            }
            match chars.peek() {
                Some(&q) if q == '"' || q == '\'' => {
                    chars.next();
                    while let Some(&c) = chars.peek() {
                        chars.next();
                        if c == q {
                            break;
                        }
                        value.push(c);
                    }
                }
                _ => {
                    while let Some(&c) = chars.peek() {
                        if c.is_whitespace() {
                            break;
                        }
                        value.push(c);
                        chars.next();
                    }
                }
            }
        }

        attrs.push((name.to_lowercase(), value));
    }
}

fn skip_comment(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    // Already past "<!", expect "--...-->"
    let mut dashes = 0;
    for c in chars.by_ref() {
        match c {
            '-' => dashes += 1,
            '>' if dashes >= 2 => return,
            _ => dashes = 0,
        }
    }
}

fn skip_until(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, target: char) {
    for c in chars.by_ref() {
        if c == target {
            return;
        }
    }
}
