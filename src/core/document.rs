//! Document trees.
//!
//! Parsing is a capability behind [`DocumentParser`]; the bundled
//! [`HtmlParser`] is a lenient HTML reader that records byte spans into the
//! input bytes, so a tag's inner content can be taken verbatim and
//! attribute values can be rewritten in place.

use crate::error::{L10nError, Result};

/// Elements that never have children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is read as raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Elements implicitly closed when a sibling of the same name opens.
const AUTO_CLOSING: &[&str] = &["p", "li", "option"];

/// Byte range into the document source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    /// Location of the value (without quotes). `None` for bare attributes.
    pub value_span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Everything between the open and close tag.
    pub inner: Span,
}

impl Tag {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Tag(Tag),
    Text(String),
}

/// A parsed document: the source text plus the node tree over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: String,
    nodes: Vec<Node>,
}

impl Document {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn slice(&self, span: Span) -> &str {
        &self.source[span.start..span.end]
    }

    /// Verbatim inner markup of `tag`.
    pub fn inner_html(&self, tag: &Tag) -> &str {
        self.slice(tag.inner)
    }

    /// All tags in pre-order.
    pub fn tags(&self) -> Vec<&Tag> {
        fn visit<'a>(nodes: &'a [Node], out: &mut Vec<&'a Tag>) {
            for node in nodes {
                if let Node::Tag(tag) = node {
                    out.push(tag);
                    visit(&tag.children, out);
                }
            }
        }

        let mut tags = Vec::new();
        visit(&self.nodes, &mut tags);
        tags
    }
}

/// Parses complete byte buffers into a [`Document`].
pub trait DocumentParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Document>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl DocumentParser for HtmlParser {
    fn parse(&self, bytes: &[u8]) -> Result<Document> {
        let source = std::str::from_utf8(bytes)
            .map_err(|e| L10nError::parse(e.valid_up_to(), "invalid UTF-8"))?;
        let nodes = TreeBuilder::new(source).build()?;
        Ok(Document {
            source: source.to_string(),
            nodes,
        })
    }
}

struct OpenElement {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    inner_start: usize,
}

impl OpenElement {
    fn close(self, inner_end: usize) -> Node {
        Node::Tag(Tag {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
            inner: Span::new(self.inner_start, inner_end),
        })
    }
}

struct TreeBuilder<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    roots: Vec<Node>,
    stack: Vec<OpenElement>,
}

impl<'a> TreeBuilder<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            roots: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn build(mut self) -> Result<Vec<Node>> {
        while self.pos < self.bytes.len() {
            let rest = &self.src[self.pos..];
            if rest.starts_with("<!--") {
                let end = self.find_from(self.pos + 4, "-->").ok_or_else(|| {
                    L10nError::parse(self.pos, "unterminated comment")
                })?;
                self.pos = end + 3;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                let end = self
                    .find_from(self.pos + 2, ">")
                    .ok_or_else(|| L10nError::parse(self.pos, "unterminated declaration"))?;
                self.pos = end + 1;
            } else if rest.starts_with("</") && self.is_name_start(self.pos + 2) {
                self.close_tag()?;
            } else if rest.starts_with('<') && self.is_name_start(self.pos + 1) {
                self.open_tag()?;
            } else {
                self.text();
            }
        }

        let end = self.bytes.len();
        while let Some(open) = self.stack.pop() {
            let node = open.close(end);
            self.push_node(node);
        }
        Ok(self.roots)
    }

    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.src[from..].find(needle).map(|i| from + i)
    }

    fn is_name_start(&self, at: usize) -> bool {
        self.bytes.get(at).is_some_and(|b| b.is_ascii_alphabetic())
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn text(&mut self) {
        let start = self.pos;
        let from = if self.bytes[start] == b'<' {
            start + 1
        } else {
            start
        };
        let end = self.find_from(from, "<").unwrap_or(self.bytes.len());
        self.pos = end;
        self.push_node(Node::Text(self.src[start..end].to_string()));
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() || b == b'>' || b == b'/' || b == b'=' {
                break;
            }
            self.pos += 1;
        }
        self.src[start..self.pos].to_ascii_lowercase()
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn close_tag(&mut self) -> Result<()> {
        let tag_start = self.pos;
        self.pos += 2;
        let name = self.read_name();
        let end = self
            .find_from(self.pos, ">")
            .ok_or_else(|| L10nError::parse(tag_start, format!("unterminated tag </{}", name)))?;
        self.pos = end + 1;

        // Stray close tags are ignored.
        let Some(index) = self.stack.iter().rposition(|open| open.name == name) else {
            return Ok(());
        };
        while self.stack.len() > index {
            if let Some(open) = self.stack.pop() {
                let node = open.close(tag_start);
                self.push_node(node);
            }
        }
        Ok(())
    }

    fn open_tag(&mut self) -> Result<()> {
        let tag_start = self.pos;
        self.pos += 1;
        let name = self.read_name();
        let mut attributes: Vec<Attribute> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos) {
                None => {
                    return Err(L10nError::parse(
                        tag_start,
                        format!("unterminated tag <{}", name),
                    ));
                }
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.bytes.get(self.pos) == Some(&b'>') {
                        self_closing = true;
                        self.pos += 1;
                        break;
                    }
                }
                Some(_) => {
                    let attribute = self.attribute(tag_start)?;
                    if !attribute.name.is_empty()
                        && !attributes.iter().any(|a| a.name == attribute.name)
                    {
                        attributes.push(attribute);
                    }
                }
            }
        }

        let inner_start = self.pos;

        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            self.push_node(Node::Tag(Tag {
                name,
                attributes,
                children: Vec::new(),
                inner: Span::new(inner_start, inner_start),
            }));
            return Ok(());
        }

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            let (inner_end, resume) = self.raw_text_end(&name);
            let text = &self.src[inner_start..inner_end];
            let children = if text.is_empty() {
                Vec::new()
            } else {
                vec![Node::Text(text.to_string())]
            };
            self.pos = resume;
            self.push_node(Node::Tag(Tag {
                name,
                attributes,
                children,
                inner: Span::new(inner_start, inner_end),
            }));
            return Ok(());
        }

        if AUTO_CLOSING.contains(&name.as_str())
            && self.stack.last().is_some_and(|open| open.name == name)
            && let Some(open) = self.stack.pop()
        {
            let node = open.close(tag_start);
            self.push_node(node);
        }

        self.stack.push(OpenElement {
            name,
            attributes,
            children: Vec::new(),
            inner_start,
        });
        Ok(())
    }

    fn attribute(&mut self, tag_start: usize) -> Result<Attribute> {
        let name = self.read_name();
        if name.is_empty() {
            // Skip a stray `=` or similar so the loop makes progress.
            self.pos += 1;
            return Ok(Attribute {
                name,
                value: String::new(),
                value_span: None,
            });
        }

        self.skip_whitespace();
        if self.bytes.get(self.pos) != Some(&b'=') {
            return Ok(Attribute {
                name,
                value: String::new(),
                value_span: None,
            });
        }
        self.pos += 1;
        self.skip_whitespace();

        let (start, end) = match self.bytes.get(self.pos) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let start = self.pos + 1;
                let close = self.src[start..]
                    .find(quote as char)
                    .map(|i| start + i)
                    .ok_or_else(|| {
                        L10nError::parse(
                            tag_start,
                            format!("unterminated value for attribute '{}'", name),
                        )
                    })?;
                self.pos = close + 1;
                (start, close)
            }
            _ => {
                let start = self.pos;
                while self.pos < self.bytes.len() {
                    let b = self.bytes[self.pos];
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
                (start, self.pos)
            }
        };

        Ok(Attribute {
            name,
            value: self.src[start..end].to_string(),
            value_span: Some(Span::new(start, end)),
        })
    }

    /// Returns (end of inner content, position after the close tag).
    fn raw_text_end(&self, name: &str) -> (usize, usize) {
        let needle = format!("</{}", name);
        let lower = self.src[self.pos..].to_ascii_lowercase();
        match lower.find(&needle) {
            Some(i) => {
                let inner_end = self.pos + i;
                let resume = self
                    .find_from(inner_end, ">")
                    .map(|gt| gt + 1)
                    .unwrap_or(self.bytes.len());
                (inner_end, resume)
            }
            None => (self.bytes.len(), self.bytes.len()),
        }
    }
}
