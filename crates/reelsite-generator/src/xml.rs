//! Minimal XML element tree with escaping on output.

use std::fmt::Write as _;

/// A node in an XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Shorthand for an element holding a single text node.
    #[must_use]
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).text(text)
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Render as a standalone UTF-8 document with two-space indentation.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_to(&mut out, 0);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape_xml(value));
        }

        match self.children.as_slice() {
            [] => out.push_str("/>\n"),
            [XmlNode::Text(text)] => {
                let _ = writeln!(out, ">{}</{}>", escape_xml(text), self.name);
            }
            children => {
                out.push_str(">\n");
                for child in children {
                    match child {
                        XmlNode::Element(el) => el.write_to(out, depth + 1),
                        XmlNode::Text(text) => {
                            let _ = writeln!(out, "{indent}  {}", escape_xml(text));
                        }
                    }
                }
                let _ = writeln!(out, "{indent}</{}>", self.name);
            }
        }
    }
}

/// Escape special XML characters.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_document() {
        let doc = XmlElement::new("root")
            .attr("xmlns", "urn:x")
            .child(XmlElement::leaf("name", "a & b"))
            .child(XmlElement::new("empty"))
            .to_document();

        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <root xmlns=\"urn:x\">\n  <name>a &amp; b</name>\n  <empty/>\n</root>\n"
        );
    }

    #[test]
    fn test_attribute_escaping() {
        let doc = XmlElement::new("a").attr("href", "/?q=\"x\"").to_document();
        assert!(doc.contains(r#"<a href="/?q=&quot;x&quot;"/>"#));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a href='x'>"), "&lt;a href=&apos;x&apos;&gt;");
    }
}
