//! A small XML DOM and its mapping to and from JSON.
//!
//! The JSON shape follows the usual attribute/text conventions: attributes are
//! `"@name"` keys, text that sits beside attributes or child elements is
//! `"#text"`, CDATA sections are `"#cdata-section"`, comments are `"#comment"`
//! and repeated sibling elements collapse into an array. Empty elements map to
//! `null` and the XML declaration becomes a `"?xml"` object.

use std::sync::OnceLock;

use log::trace;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use serde_json::map::Entry;
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

const DECLARATION_KEY: &str = "?xml";
const TEXT_KEY: &str = "#text";
const CDATA_KEY: &str = "#cdata-section";
const COMMENT_KEY: &str = "#comment";
const ATTRIBUTE_PREFIX: char = '@';
/// Deepest element nesting accepted by `XmlDocument::parse`.
const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// A parsed document: an optional declaration and exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub declaration: Option<XmlDeclaration>,
    pub root: XmlElement,
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes).map(str::to_string).map_err(Error::xml)
}

impl XmlDeclaration {
    fn from_event(decl: &BytesDecl) -> Result<Self> {
        let version = utf8(&decl.version()?)?;
        let encoding = decl.encoding().transpose()?.map(|e| utf8(&e)).transpose()?;
        let standalone = decl.standalone().transpose()?.map(|s| utf8(&s)).transpose()?;
        Ok(Self { version, encoding, standalone })
    }

    fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        map.insert("@version".to_string(), JsonValue::String(self.version.clone()));
        if let Some(encoding) = &self.encoding {
            map.insert("@encoding".to_string(), JsonValue::String(encoding.clone()));
        }
        if let Some(standalone) = &self.standalone {
            map.insert("@standalone".to_string(), JsonValue::String(standalone.clone()));
        }
        JsonValue::Object(map)
    }

    fn from_json(value: &JsonValue) -> Result<Self> {
        let JsonValue::Object(map) = value else {
            return Err(Error::json("the '?xml' declaration must be an object"));
        };
        let field = |key: &str| map.get(key).and_then(scalar_text);
        Ok(Self {
            version: field("@version").unwrap_or_else(|| "1.0".to_string()),
            encoding: field("@encoding"),
            standalone: field("@standalone"),
        })
    }
}

impl XmlNode {
    /// Concatenated text of this node and its descendants. Comments have none.
    pub fn inner_text(&self) -> String {
        match self {
            XmlNode::Element(element) => element.inner_text(),
            XmlNode::Text(text) | XmlNode::CData(text) => text.clone(),
            XmlNode::Comment(_) => String::new(),
        }
    }
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    fn from_start(tag: &BytesStart) -> Result<Self> {
        let mut element = Self::new(utf8(tag.name().as_ref())?);
        for attr in tag.attributes() {
            let attr = attr.map_err(Error::xml)?;
            let key = utf8(attr.key.as_ref())?;
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text, CDATA and comments.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// First element called `name` in document order, this one included.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.elements().find_map(|element| element.find(name))
    }

    pub fn inner_text(&self) -> String {
        self.children.iter().map(XmlNode::inner_text).collect()
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_to(writer)?,
                XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
                XmlNode::CData(data) => {
                    writer.write_event(Event::CData(BytesCData::new(data.as_str())))?
                }
                XmlNode::Comment(comment) => {
                    writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?
                }
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    fn to_json(&self) -> JsonValue {
        if self.attributes.is_empty() {
            if self.children.is_empty() {
                return JsonValue::Null;
            }
            if self.children.iter().all(|node| matches!(node, XmlNode::Text(_))) {
                return JsonValue::String(self.inner_text());
            }
        }

        let mut map = Map::new();
        for (key, value) in &self.attributes {
            map.insert(format!("{ATTRIBUTE_PREFIX}{key}"), JsonValue::String(value.clone()));
        }
        for child in &self.children {
            let (key, value) = match child {
                XmlNode::Element(element) => (element.name.clone(), element.to_json()),
                XmlNode::Text(text) => (TEXT_KEY.to_string(), JsonValue::String(text.clone())),
                XmlNode::CData(data) => (CDATA_KEY.to_string(), JsonValue::String(data.clone())),
                XmlNode::Comment(comment) => {
                    (COMMENT_KEY.to_string(), JsonValue::String(comment.clone()))
                }
            };
            insert_grouped(&mut map, key, value);
        }
        JsonValue::Object(map)
    }

    fn from_json(name: &str, value: &JsonValue) -> Result<Self> {
        let mut element = Self::new(name);
        let JsonValue::Object(map) = value else {
            let text = scalar_text(value)
                .ok_or_else(|| Error::json(format!("unexpected nested array under '{name}'")))?;
            if !text.is_empty() {
                element.children.push(XmlNode::Text(text));
            }
            return Ok(element);
        };

        for (key, value) in map {
            if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
                validate_name(attribute)?;
                let text = scalar_text(value).ok_or_else(|| {
                    Error::json(format!("attribute '{attribute}' must hold a scalar"))
                })?;
                element.attributes.push((attribute.to_string(), text));
                continue;
            }
            match key.as_str() {
                TEXT_KEY => element.children.extend(text_nodes(value, XmlNode::Text)?),
                CDATA_KEY => element.children.extend(text_nodes(value, XmlNode::CData)?),
                COMMENT_KEY => element.children.extend(text_nodes(value, XmlNode::Comment)?),
                _ => element
                    .children
                    .extend(elements_from_json(key, value)?.into_iter().map(XmlNode::Element)),
            }
        }
        Ok(element)
    }
}

impl XmlDocument {
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = Reader::from_str(input);
        let mut declaration = None;
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Decl(decl) => declaration = Some(XmlDeclaration::from_event(&decl)?),
                Event::Start(tag) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(Error::xml("document exceeds maximum nesting depth"));
                    }
                    stack.push(XmlElement::from_start(&tag)?);
                }
                Event::Empty(tag) => attach(&mut stack, &mut root, XmlElement::from_start(&tag)?)?,
                Event::End(_) => {
                    let element =
                        stack.pop().ok_or_else(|| Error::xml("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if !text.trim().is_empty() {
                        push_node(&mut stack, XmlNode::Text(text.into_owned()))?;
                    }
                }
                Event::CData(data) => push_node(&mut stack, XmlNode::CData(utf8(&data)?))?,
                Event::Comment(comment) => {
                    // Comments around the root element are dropped.
                    if let Some(current) = stack.last_mut() {
                        current.children.push(XmlNode::Comment(utf8(&comment)?));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::xml(format!("element '{}' is not closed", open.name)));
        }
        let root = root.ok_or_else(|| Error::xml("document has no root element"))?;
        trace!("Parsed XML document with root '{}'", root.name);
        Ok(Self { declaration, root })
    }

    /// Builds a document from its JSON form.
    ///
    /// The object must hold exactly one element property, optionally preceded
    /// or followed by a `"?xml"` declaration.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let JsonValue::Object(map) = value else {
            return Err(Error::json("the document must be a JSON object"));
        };

        let mut declaration = None;
        let mut root = None;
        for (key, value) in map {
            if key == DECLARATION_KEY {
                declaration = Some(XmlDeclaration::from_json(value)?);
                continue;
            }
            if root.is_some() {
                return Err(Error::json("the document has more than one root property"));
            }
            if key.starts_with(ATTRIBUTE_PREFIX) || key.starts_with('#') {
                return Err(Error::json(format!("'{key}' cannot be a root element")));
            }
            let mut elements = elements_from_json(key, value)?;
            if elements.len() != 1 {
                return Err(Error::json(format!("root '{key}' must be a single element")));
            }
            root = elements.pop();
        }

        let root = root.ok_or_else(|| Error::json("the document has no root property"))?;
        Ok(Self { declaration, root })
    }

    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        if let Some(declaration) = &self.declaration {
            map.insert(DECLARATION_KEY.to_string(), declaration.to_json());
        }
        map.insert(self.root.name.clone(), self.root.to_json());
        JsonValue::Object(map)
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        if let Some(decl) = &self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }
        self.root.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(Error::xml)
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::xml(format!("'{}' is a second root element", element.name)));
    }
    *root = Some(element);
    Ok(())
}

fn push_node(stack: &mut [XmlElement], node: XmlNode) -> Result<()> {
    let current = stack
        .last_mut()
        .ok_or_else(|| Error::xml("content outside the root element"))?;
    current.children.push(node);
    Ok(())
}

fn insert_grouped(map: &mut Map<String, JsonValue>, key: String, value: JsonValue) {
    match map.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
        Entry::Occupied(mut entry) => match entry.get_mut() {
            JsonValue::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = JsonValue::Array(vec![first, value]);
            }
        },
    }
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => Some(String::new()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

fn text_nodes(value: &JsonValue, node: fn(String) -> XmlNode) -> Result<Vec<XmlNode>> {
    let items = match value {
        JsonValue::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };
    items
        .iter()
        .map(|item| {
            scalar_text(item)
                .map(node)
                .ok_or_else(|| Error::json("text content must be a scalar"))
        })
        .collect()
}

fn elements_from_json(name: &str, value: &JsonValue) -> Result<Vec<XmlElement>> {
    validate_name(name)?;
    match value {
        JsonValue::Array(items) => {
            items.iter().map(|item| XmlElement::from_json(name, item)).collect()
        }
        single => Ok(vec![XmlElement::from_json(name, single)?]),
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\p{L}_:][\p{L}\p{N}_:.\-]*$").expect("XML name pattern is valid")
    })
}

fn validate_name(name: &str) -> Result<()> {
    if name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(Error::json(format!("'{name}' is not a valid XML name")))
    }
}

/// Converts an XML document to compact JSON.
pub fn xml_to_json(input: &str) -> Result<String> {
    let document = XmlDocument::parse(input)?;
    Ok(serde_json::to_string(&document.to_json())?)
}

/// Converts JSON back to XML markup.
pub fn json_to_xml(input: &str) -> Result<String> {
    let value: JsonValue = serde_json::from_str(input)?;
    XmlDocument::from_json(&value)?.to_xml_string()
}

/// Text extraction on a node that may be absent.
pub trait InnerTextExt {
    /// The node's concatenated descendant text, or `""` when there is no node.
    fn inner_text_or_empty(&self) -> String;
}

impl InnerTextExt for Option<&XmlElement> {
    fn inner_text_or_empty(&self) -> String {
        self.map(XmlElement::inner_text).unwrap_or_default()
    }
}

impl InnerTextExt for Option<&XmlNode> {
    fn inner_text_or_empty(&self) -> String {
        self.map(XmlNode::inner_text).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_builds_the_tree() {
        let doc = XmlDocument::parse(r#"<a x="1"><b>hi</b><!-- note --><c/></a>"#).unwrap();
        assert!(doc.declaration.is_none());
        assert_eq!(doc.root.name, "a");
        assert_eq!(doc.root.attribute("x"), Some("1"));
        assert_eq!(doc.root.children.len(), 3);
        assert_eq!(doc.root.child("b").inner_text_or_empty(), "hi");
        assert!(doc.root.child("c").unwrap().children.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_documents() {
        for input in ["<a><b></a>", "<a>", "<a/><b/>", "", "text<a/>"] {
            assert!(
                matches!(XmlDocument::parse(input), Err(Error::Parse { .. })),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn parse_limits_nesting_depth() {
        let nested = |depth: usize| "<a>".repeat(depth) + &"</a>".repeat(depth);
        assert!(XmlDocument::parse(&nested(MAX_DEPTH)).is_ok());
        for depth in [MAX_DEPTH + 1, 2_000, 200_000] {
            assert!(matches!(xml_to_json(&nested(depth)), Err(Error::Parse { .. })));
        }
    }

    #[test]
    fn inner_text_concatenates_descendants() {
        let doc = XmlDocument::parse("<p>Hello <b>big</b> <![CDATA[world]]></p>").unwrap();
        assert_eq!(doc.root.inner_text(), "Hello bigworld");
        assert_eq!(doc.root.find("b").inner_text_or_empty(), "big");
        assert_eq!(doc.root.find("missing").inner_text_or_empty(), "");
    }

    #[test]
    fn xml_to_json_follows_the_conventions() {
        let input = r#"<?xml version="1.0" encoding="utf-8"?><root id="7"><item>a</item><item>b</item><empty/><mixed k="v">t</mixed></root>"#;
        let json: JsonValue = serde_json::from_str(&xml_to_json(input).unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "?xml": {"@version": "1.0", "@encoding": "utf-8"},
                "root": {
                    "@id": "7",
                    "item": ["a", "b"],
                    "empty": null,
                    "mixed": {"@k": "v", "#text": "t"}
                }
            })
        );
    }

    #[test]
    fn text_is_escaped_on_output() {
        let xml = json_to_xml(r##"{"a": {"@q": "\"x\"", "#text": "1 < 2 & 3"}}"##).unwrap();
        assert_eq!(xml, r#"<a q="&quot;x&quot;">1 &lt; 2 &amp; 3</a>"#);
        let back = XmlDocument::parse(&xml).unwrap();
        assert_eq!(back.root.inner_text(), "1 < 2 & 3");
    }

    #[test]
    fn json_to_xml_renders_scalars_and_nulls() {
        let xml = json_to_xml(r#"{"order": {"id": 3, "paid": true, "note": null}}"#).unwrap();
        assert_eq!(xml, "<order><id>3</id><paid>true</paid><note/></order>");
    }

    #[test]
    fn json_to_xml_requires_a_single_root() {
        for input in [r#"{"a": 1, "b": 2}"#, r#"{}"#, r#"[1]"#, r#"{"a": [1, 2]}"#, "nope"] {
            assert!(
                matches!(json_to_xml(input), Err(Error::Parse { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn json_to_xml_rejects_invalid_names() {
        assert!(json_to_xml(r#"{"1abc": "x"}"#).is_err());
        assert!(json_to_xml(r#"{"a": {"b c": "x"}}"#).is_err());
    }

    #[test]
    fn cdata_and_comments_round_trip() {
        let input = "<a><![CDATA[<raw>]]><!--c--><b/></a>";
        let json = xml_to_json(input).unwrap();
        assert_eq!(json, r##"{"a":{"#cdata-section":"<raw>","#comment":"c","b":null}}"##);
        assert_eq!(json_to_xml(&json).unwrap(), input);
    }
}
