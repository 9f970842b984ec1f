//! In-memory XML element tree with pretty-printing and serialization.
//!
//! The tree follows the text/tail model: an element's `text` is the
//! character data before its first child, and a child's `tail` is the
//! character data that follows its end tag inside the parent. Indentation
//! is expressed purely through these two fields, so [`XmlElement::indent`]
//! followed by [`XmlElement::to_xml_string`] yields byte-stable output.

use std::fmt::{self, Write as _};

/// One indentation unit.
const INDENT_UNIT: &str = "  ";

/// An XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    tag: String,
    text: Option<String>,
    tail: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Counts this element and all of its descendants.
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(XmlElement::element_count)
            .sum::<usize>()
    }

    /// Assigns whitespace text and tails so the tree prints one element per
    /// line, indented by two spaces per level.
    ///
    /// - A non-leaf element whose text is empty or whitespace gets a newline
    ///   plus one more indent than its own level.
    /// - Every child's tail is overwritten: a newline plus the child's level
    ///   for all but the last child, which gets the parent's level.
    /// - A non-leaf element without a tail gets a newline plus its own level.
    /// - A leaf below the top level gets a newline plus its level as tail
    ///   unless its tail already holds non-whitespace text.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelgen::element::XmlElement;
    ///
    /// let mut course = XmlElement::new("Course");
    /// course.push_child(XmlElement::new("title").with_text("string"));
    /// let mut program = XmlElement::new("Program");
    /// program.push_child(course);
    ///
    /// program.indent();
    /// assert_eq!(
    ///     program.to_xml_string(),
    ///     "<Program>\n  <Course>\n    <title>string</title>\n  </Course>\n</Program>\n"
    /// );
    /// ```
    pub fn indent(&mut self) {
        self.indent_at(0);
    }

    fn indent_at(&mut self, level: usize) {
        let own = newline_indent(level);
        if self.children.is_empty() {
            if level > 0 && is_blank(self.tail.as_deref()) {
                self.tail = Some(own);
            }
            return;
        }

        if is_blank(self.text.as_deref()) {
            self.text = Some(newline_indent(level + 1));
        }
        let last = self.children.len() - 1;
        for (idx, child) in self.children.iter_mut().enumerate() {
            child.indent_at(level + 1);
            child.tail = Some(if idx == last {
                own.clone()
            } else {
                newline_indent(level + 1)
            });
        }
        if self.tail.as_deref().is_none_or(str::is_empty) {
            self.tail = Some(own);
        }
    }

    /// Serializes the element, its descendants and its tail, without an XML
    /// declaration.
    pub fn to_xml_string(&self) -> String {
        self.to_string()
    }

    fn write_to(&self, out: &mut impl fmt::Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        let text = self.text.as_deref().filter(|text| !text.is_empty());
        if text.is_none() && self.children.is_empty() {
            out.write_str(" />")?;
        } else {
            out.write_char('>')?;
            if let Some(text) = text {
                write_escaped(out, text)?;
            }
            for child in &self.children {
                child.write_to(out)?;
            }
            write!(out, "</{}>", self.tag)?;
        }
        if let Some(tail) = self.tail.as_deref() {
            write_escaped(out, tail)?;
        }
        Ok(())
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

fn newline_indent(level: usize) -> String {
    format!("\n{}", INDENT_UNIT.repeat(level))
}

fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|text| text.trim().is_empty())
}

/// Escapes character data. Quotes are left as-is.
fn write_escaped(out: &mut impl fmt::Write, text: &str) -> fmt::Result {
    let mut rest = text;
    while let Some(pos) = rest.find(['&', '<', '>']) {
        out.write_str(&rest[..pos])?;
        out.write_str(match rest.as_bytes()[pos] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            _ => "&gt;",
        })?;
        rest = &rest[pos + 1..];
    }
    out.write_str(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, text: &str) -> XmlElement {
        XmlElement::new(tag).with_text(text)
    }

    #[test]
    fn test_serialize_without_indent() {
        let mut course = XmlElement::new("Course");
        course.push_child(leaf("title", "string"));
        let mut program = XmlElement::new("Program");
        program.push_child(course);

        assert_eq!(
            program.to_xml_string(),
            "<Program><Course><title>string</title></Course></Program>"
        );
    }

    #[test]
    fn test_empty_element_is_self_closing() {
        assert_eq!(XmlElement::new("Program").to_xml_string(), "<Program />");
        assert_eq!(leaf("title", "").to_xml_string(), "<title />");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            leaf("t", "Map<K, V> & \"more\"").to_xml_string(),
            "<t>Map&lt;K, V&gt; &amp; \"more\"</t>"
        );
    }

    #[test]
    fn test_indent_lone_root_is_unchanged() {
        let mut root = XmlElement::new("Program");
        root.indent();

        assert_eq!(root.tail(), None);
        assert_eq!(root.to_xml_string(), "<Program />");
    }

    #[test]
    fn test_indent_siblings_and_nesting() {
        let mut course = XmlElement::new("Course");
        course.push_child(leaf("title", "string"));
        course.push_child(leaf("credits", "int"));
        let mut program = XmlElement::new("Program");
        program.push_child(leaf("name", "string"));
        program.push_child(course);
        program.push_child(XmlElement::new("Track"));

        program.indent();

        assert_eq!(
            program.to_xml_string(),
            "<Program>\n  <name>string</name>\n  <Course>\n    <title>string</title>\n    <credits>int</credits>\n  </Course>\n  <Track />\n</Program>\n"
        );
    }

    #[test]
    fn test_indent_keeps_meaningful_text() {
        let mut root = XmlElement::new("root").with_text("keep");
        root.push_child(leaf("a", "1"));

        root.indent();

        assert_eq!(root.to_xml_string(), "<root>keep<a>1</a>\n</root>\n");
    }

    #[test]
    fn test_indent_is_idempotent() {
        let mut course = XmlElement::new("Course");
        course.push_child(leaf("title", "string"));
        let mut program = XmlElement::new("Program");
        program.push_child(course);

        program.indent();
        let once = program.to_xml_string();
        program.indent();

        assert_eq!(program.to_xml_string(), once);
    }

    #[test]
    fn test_element_count() {
        let mut course = XmlElement::new("Course");
        course.push_child(leaf("title", "string"));
        let mut program = XmlElement::new("Program");
        program.push_child(course);

        assert_eq!(program.element_count(), 3);
    }
}
