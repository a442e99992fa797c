//! Schema model parsed from the registry XSD
//!
//! The registry schema uses a small, fixed subset of XSD: sequences of
//! elements with occurrence bounds, attributes with simple types, and
//! simple-type restrictions (enumeration, pattern, minLength) over the
//! `string`, `date` and `unsignedLong` base types. The model here covers
//! exactly that subset.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Base type of a simple type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    /// `xs:string`
    String,
    /// `xs:date` (`YYYY-MM-DD`)
    Date,
    /// `xs:unsignedLong`
    UnsignedLong,
}

/// A simple type: base plus restriction facets
#[derive(Debug, Clone)]
pub struct SimpleType {
    /// The restriction base
    pub base: BaseType,
    /// Admitted values, if the restriction enumerates them
    pub enumeration: Option<Vec<String>>,
    /// Anchored value pattern, if any
    pub pattern: Option<Regex>,
    /// Minimum character count, if any
    pub min_length: Option<usize>,
}

impl SimpleType {
    fn base(base: BaseType) -> Self {
        Self {
            base,
            enumeration: None,
            pattern: None,
            min_length: None,
        }
    }
}

/// An attribute declaration on a complex type
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    /// Attribute name
    pub name: String,
    /// Whether `use="required"`
    pub required: bool,
    /// The attribute's simple type
    pub simple_type: SimpleType,
}

/// Content model of an element
#[derive(Debug, Clone)]
pub enum Content {
    /// Text content validated by a simple type
    Simple(SimpleType),
    /// Child elements and attributes
    Complex(ComplexType),
}

/// A complex type: an `xs:sequence` of child elements plus attributes
#[derive(Debug, Clone)]
pub struct ComplexType {
    /// Child element particles, in schema order
    pub sequence: Vec<ElementDecl>,
    /// Declared attributes
    pub attributes: Vec<AttributeDecl>,
}

/// An element declaration
#[derive(Debug, Clone)]
pub struct ElementDecl {
    /// Element name
    pub name: String,
    /// Minimum occurrences (default 1)
    pub min_occurs: usize,
    /// Maximum occurrences; `None` means unbounded (default 1)
    pub max_occurs: Option<usize>,
    /// The element's content model
    pub content: Content,
}

/// Parse the XSD text into the root element declaration
pub fn parse_schema(xsd: &str) -> Result<ElementDecl> {
    let doc = roxmltree::Document::parse(xsd)
        .map_err(|e| Error::SchemaParse(format!("malformed XSD: {}", e)))?;
    let schema = doc.root_element();
    if schema.tag_name().name() != "schema" || schema.tag_name().namespace() != Some(XSD_NAMESPACE)
    {
        return Err(Error::SchemaParse(
            "root element is not an XML Schema document".to_string(),
        ));
    }

    // Named simple types first, the root element references them
    let mut simple_types = HashMap::new();
    for child in schema.children().filter(|n| n.is_element()) {
        if child.tag_name().name() == "simpleType" {
            let name = child
                .attribute("name")
                .ok_or_else(|| Error::SchemaParse("unnamed top-level simpleType".to_string()))?;
            let simple_type = parse_simple_type(child)?;
            simple_types.insert(name.to_string(), simple_type);
        }
    }

    let root = schema
        .children()
        .filter(|n| n.is_element())
        .find(|n| n.tag_name().name() == "element")
        .ok_or_else(|| Error::SchemaParse("schema declares no root element".to_string()))?;

    parse_element(root, &simple_types)
}

fn parse_simple_type(node: roxmltree::Node) -> Result<SimpleType> {
    let restriction = node
        .children()
        .filter(|n| n.is_element())
        .find(|n| n.tag_name().name() == "restriction")
        .ok_or_else(|| Error::SchemaParse("simpleType without restriction".to_string()))?;

    let base_name = restriction
        .attribute("base")
        .ok_or_else(|| Error::SchemaParse("restriction without base".to_string()))?;
    let mut simple_type = SimpleType::base(builtin_base(base_name)?);

    let mut enumeration = Vec::new();
    for facet in restriction.children().filter(|n| n.is_element()) {
        let value = facet.attribute("value").unwrap_or_default();
        match facet.tag_name().name() {
            "enumeration" => enumeration.push(value.to_string()),
            "pattern" => {
                // XSD patterns are implicitly anchored
                let anchored = format!("^(?:{})$", value);
                let regex = Regex::new(&anchored).map_err(|e| {
                    Error::SchemaParse(format!("unsupported pattern '{}': {}", value, e))
                })?;
                simple_type.pattern = Some(regex);
            }
            "minLength" => {
                let length = value.parse().map_err(|_| {
                    Error::SchemaParse(format!("invalid minLength value '{}'", value))
                })?;
                simple_type.min_length = Some(length);
            }
            other => {
                return Err(Error::SchemaParse(format!(
                    "unsupported restriction facet '{}'",
                    other
                )))
            }
        }
    }
    if !enumeration.is_empty() {
        simple_type.enumeration = Some(enumeration);
    }

    Ok(simple_type)
}

fn builtin_base(name: &str) -> Result<BaseType> {
    let local = name.split(':').next_back().unwrap_or(name);
    match local {
        "string" => Ok(BaseType::String),
        "date" => Ok(BaseType::Date),
        "unsignedLong" => Ok(BaseType::UnsignedLong),
        other => Err(Error::SchemaParse(format!(
            "unsupported base type '{}'",
            other
        ))),
    }
}

fn resolve_type(name: &str, simple_types: &HashMap<String, SimpleType>) -> Result<SimpleType> {
    if let Some(simple_type) = simple_types.get(name) {
        return Ok(simple_type.clone());
    }
    Ok(SimpleType::base(builtin_base(name)?))
}

fn parse_element(
    node: roxmltree::Node,
    simple_types: &HashMap<String, SimpleType>,
) -> Result<ElementDecl> {
    let name = node
        .attribute("name")
        .ok_or_else(|| Error::SchemaParse("element without name".to_string()))?
        .to_string();

    let min_occurs = match node.attribute("minOccurs") {
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::SchemaParse(format!("invalid minOccurs '{}'", raw)))?,
        None => 1,
    };
    let max_occurs = match node.attribute("maxOccurs") {
        Some("unbounded") => None,
        Some(raw) => Some(
            raw.parse()
                .map_err(|_| Error::SchemaParse(format!("invalid maxOccurs '{}'", raw)))?,
        ),
        None => Some(1),
    };

    let content = if let Some(type_name) = node.attribute("type") {
        Content::Simple(resolve_type(type_name, simple_types)?)
    } else {
        let complex = node
            .children()
            .filter(|n| n.is_element())
            .find(|n| n.tag_name().name() == "complexType")
            .ok_or_else(|| {
                Error::SchemaParse(format!("element '{}' has neither type nor complexType", name))
            })?;
        Content::Complex(parse_complex_type(complex, simple_types)?)
    };

    Ok(ElementDecl {
        name,
        min_occurs,
        max_occurs,
        content,
    })
}

fn parse_complex_type(
    node: roxmltree::Node,
    simple_types: &HashMap<String, SimpleType>,
) -> Result<ComplexType> {
    let mut sequence = Vec::new();
    let mut attributes = Vec::new();

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "sequence" => {
                for particle in child.children().filter(|n| n.is_element()) {
                    if particle.tag_name().name() != "element" {
                        return Err(Error::SchemaParse(format!(
                            "unsupported particle '{}'",
                            particle.tag_name().name()
                        )));
                    }
                    sequence.push(parse_element(particle, simple_types)?);
                }
            }
            "attribute" => {
                let name = child
                    .attribute("name")
                    .ok_or_else(|| Error::SchemaParse("attribute without name".to_string()))?
                    .to_string();
                let type_name = child.attribute("type").ok_or_else(|| {
                    Error::SchemaParse(format!("attribute '{}' without type", name))
                })?;
                attributes.push(AttributeDecl {
                    name,
                    required: child.attribute("use") == Some("required"),
                    simple_type: resolve_type(type_name, simple_types)?,
                });
            }
            other => {
                return Err(Error::SchemaParse(format!(
                    "unsupported complexType child '{}'",
                    other
                )))
            }
        }
    }

    Ok(ComplexType {
        sequence,
        attributes,
    })
}
