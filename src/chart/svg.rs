//! Minimal SVG/HTML element tree.
//!
//! Renderers build an [`Element`] and hand it to a page container; nothing is
//! serialized until the page is written out.

use std::fmt::{self, Display, Write};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// HTML elements that never have content or a closing tag
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Root `<svg>` element sized in pixels
    pub fn svg(width: f64, height: f64) -> Self {
        Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("width", num(width))
            .attr("height", num(height))
            .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
    }

    /// Set an attribute, replacing an existing value
    pub fn attr(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key.to_string(), value)),
        }
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => out.push_str(&el.text_content()),
            }
        }
        out
    }

    /// This element and all descendants named `name`, in document order
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(name, &mut found);
        found
    }

    fn collect<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect(name, found);
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_id(id))
    }

    // Empty elements self-close only inside <svg>. In HTML, void elements
    // get no end tag and everything else gets an explicit one.
    fn write_to(&self, out: &mut String, in_svg: bool) -> fmt::Result {
        let in_svg = in_svg || self.name == "svg";
        write!(out, "<{}", self.name)?;
        for (key, value) in &self.attrs {
            write!(out, " {}=\"{}\"", key, escape(value))?;
        }
        if self.children.is_empty() {
            if in_svg {
                return out.write_str("/>");
            }
            if VOID_ELEMENTS.contains(&self.name.as_str()) {
                return out.write_char('>');
            }
            return write!(out, "></{}>", self.name);
        }
        out.write_char('>')?;
        for node in &self.children {
            match node {
                Node::Element(el) => el.write_to(out, in_svg)?,
                Node::Text(text) => out.write_str(&escape(text))?,
            }
        }
        write!(out, "</{}>", self.name)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out, false)?;
        f.write_str(&out)
    }
}

/// Escape text for use in markup and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Coordinate formatting: at most two decimals, no trailing zeros
pub fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
