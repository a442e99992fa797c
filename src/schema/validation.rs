//! Instance validation against the schema model
//!
//! Walks the document tree alongside the element declarations and collects
//! every violation found, each with the line/column of the offending node
//! and an XPath-like location.

use super::model::{BaseType, Content, ElementDecl, SimpleType};
use crate::error::SchemaViolation;
use chrono::NaiveDate;
use roxmltree::{Document, Node};

/// Validate a parsed document against the root element declaration
pub fn validate_document(root_decl: &ElementDecl, doc: &Document) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    let root = doc.root_element();

    if root.tag_name().name() != root_decl.name {
        violations.push(violation_at(
            root,
            format!("/{}", root.tag_name().name()),
            format!(
                "expected root element '{}', found '{}'",
                root_decl.name,
                root.tag_name().name()
            ),
        ));
        return violations;
    }

    let path = format!("/{}", root_decl.name);
    validate_element(root_decl, root, &path, &mut violations);
    violations
}

fn validate_element(
    decl: &ElementDecl,
    node: Node,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    match &decl.content {
        Content::Simple(simple_type) => {
            if let Some(child) = node.children().find(|n| n.is_element()) {
                violations.push(violation_at(
                    child,
                    path.to_string(),
                    format!(
                        "element '{}' has simple content but contains element '{}'",
                        decl.name,
                        child.tag_name().name()
                    ),
                ));
                return;
            }
            let text = node.text().unwrap_or_default();
            validate_simple_value(simple_type, text, node, path, violations);
        }
        Content::Complex(complex) => {
            validate_attributes(decl, node, path, violations);
            validate_sequence(decl, node, path, violations, &complex.sequence);
        }
    }
}

fn validate_attributes(
    decl: &ElementDecl,
    node: Node,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    let declared = match &decl.content {
        Content::Complex(complex) => &complex.attributes,
        Content::Simple(_) => return,
    };

    for attr_decl in declared {
        match node.attribute(attr_decl.name.as_str()) {
            Some(value) => {
                let attr_path = format!("{}/@{}", path, attr_decl.name);
                validate_simple_value(&attr_decl.simple_type, value, node, &attr_path, violations);
            }
            None if attr_decl.required => {
                violations.push(violation_at(
                    node,
                    path.to_string(),
                    format!(
                        "required attribute '{}' is missing on element '{}'",
                        attr_decl.name, decl.name
                    ),
                ));
            }
            None => {}
        }
    }

    for attr in node.attributes() {
        // Namespace declarations are not schema attributes
        if attr.namespace() == Some("http://www.w3.org/2000/xmlns/") {
            continue;
        }
        if !declared.iter().any(|d| d.name == attr.name()) {
            violations.push(violation_at(
                node,
                path.to_string(),
                format!(
                    "attribute '{}' is not allowed on element '{}'",
                    attr.name(),
                    decl.name
                ),
            ));
        }
    }
}

fn validate_sequence(
    decl: &ElementDecl,
    node: Node,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
    sequence: &[ElementDecl],
) {
    let children: Vec<Node> = node.children().filter(|n| n.is_element()).collect();
    let mut index = 0;

    for particle in sequence {
        let mut count = 0;
        while index < children.len() && children[index].tag_name().name() == particle.name {
            let child = children[index];
            let child_path = if particle.max_occurs == Some(1) {
                format!("{}/{}", path, particle.name)
            } else {
                format!("{}/{}[{}]", path, particle.name, count + 1)
            };
            validate_element(particle, child, &child_path, violations);
            count += 1;
            index += 1;
        }

        if count < particle.min_occurs {
            violations.push(violation_at(
                node,
                path.to_string(),
                format!(
                    "element '{}' requires child '{}' ({} found, {} required)",
                    decl.name, particle.name, count, particle.min_occurs
                ),
            ));
        }
        if let Some(max) = particle.max_occurs {
            if count > max {
                violations.push(violation_at(
                    node,
                    path.to_string(),
                    format!(
                        "element '{}' allows at most {} '{}' children, {} found",
                        decl.name, max, particle.name, count
                    ),
                ));
            }
        }
    }

    for child in &children[index..] {
        violations.push(violation_at(
            *child,
            format!("{}/{}", path, child.tag_name().name()),
            format!(
                "element '{}' is not allowed here inside '{}'",
                child.tag_name().name(),
                decl.name
            ),
        ));
    }
}

fn validate_simple_value(
    simple_type: &SimpleType,
    value: &str,
    node: Node,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    match simple_type.base {
        BaseType::String => {}
        BaseType::Date => {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                violations.push(violation_at(
                    node,
                    path.to_string(),
                    format!("'{}' is not a valid date (expected YYYY-MM-DD)", value),
                ));
                return;
            }
        }
        BaseType::UnsignedLong => {
            if value.trim().parse::<u64>().is_err() {
                violations.push(violation_at(
                    node,
                    path.to_string(),
                    format!("'{}' is not a valid unsigned integer", value),
                ));
                return;
            }
        }
    }

    if let Some(min_length) = simple_type.min_length {
        if value.chars().count() < min_length {
            violations.push(violation_at(
                node,
                path.to_string(),
                format!(
                    "value '{}' is shorter than the minimum length {}",
                    value, min_length
                ),
            ));
        }
    }

    if let Some(pattern) = &simple_type.pattern {
        if !pattern.is_match(value) {
            violations.push(violation_at(
                node,
                path.to_string(),
                format!("value '{}' does not match the required pattern", value),
            ));
        }
    }

    if let Some(enumeration) = &simple_type.enumeration {
        if !enumeration.iter().any(|admitted| admitted == value) {
            violations.push(violation_at(
                node,
                path.to_string(),
                format!("value '{}' is not among the admitted values", value),
            ));
        }
    }
}

fn violation_at(node: Node, path: String, message: String) -> SchemaViolation {
    let pos = node.document().text_pos_at(node.range().start);
    SchemaViolation {
        line: pos.row,
        column: pos.col,
        path,
        message,
    }
}
