use crate::error::{ExportError, Result};
use crate::projector::{ColumnOrder, ProjectedItem};
use crate::renderer::{value_to_cell, ExportFormat, Renderer};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Hierarchical-markup output: a `models` root with one `model` element per
/// item. Dotted keys nest (`a.b.c` becomes `<a><b><c>`), and dotted keys
/// sharing a prefix share their intermediate elements instead of duplicating
/// them. Leaf text is the value's string form; output is indented.
pub struct XmlRenderer;

/// Intermediate element tree for one item. A Vec keeps sibling order stable
/// (column order) while still allowing prefix reuse.
enum XmlNode {
    Branch(Vec<(String, XmlNode)>),
    Leaf(String),
}

fn insert_path(children: &mut Vec<(String, XmlNode)>, segments: &[&str], text: String) {
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => return,
    };

    if rest.is_empty() {
        children.push((first.to_string(), XmlNode::Leaf(text)));
        return;
    }

    // Reuse an existing sibling branch with the same tag at this level.
    for (tag, node) in children.iter_mut() {
        if tag == first {
            if let XmlNode::Branch(inner) = node {
                insert_path(inner, rest, text);
                return;
            }
        }
    }

    let mut inner = Vec::new();
    insert_path(&mut inner, rest, text);
    children.push((first.to_string(), XmlNode::Branch(inner)));
}

fn build_item_tree(columns: &ColumnOrder, item: &ProjectedItem) -> Vec<(String, XmlNode)> {
    let mut children = Vec::new();

    for key in columns.keys() {
        if let Some(value) = item.get(key) {
            let segments: Vec<&str> = key.split('.').collect();
            insert_path(&mut children, &segments, value_to_cell(value));
        }
    }

    children
}

fn write_nodes<W: std::io::Write>(
    writer: &mut Writer<W>,
    children: &[(String, XmlNode)],
) -> Result<()> {
    for (tag, node) in children {
        // Empty leaves become self-closing elements; the indented writer
        // would otherwise split the open and close tags across lines.
        if let XmlNode::Leaf(text) = node {
            if text.is_empty() {
                writer
                    .write_event(Event::Empty(BytesStart::new(tag.as_str())))
                    .map_err(|e| ExportError::render("xml", e.to_string()))?;
                continue;
            }
        }

        writer
            .write_event(Event::Start(BytesStart::new(tag.as_str())))
            .map_err(|e| ExportError::render("xml", e.to_string()))?;

        match node {
            XmlNode::Leaf(text) => {
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(|e| ExportError::render("xml", e.to_string()))?;
            }
            XmlNode::Branch(inner) => write_nodes(writer, inner)?,
        }

        writer
            .write_event(Event::End(BytesEnd::new(tag.as_str())))
            .map_err(|e| ExportError::render("xml", e.to_string()))?;
    }

    Ok(())
}

impl Renderer for XmlRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xml
    }

    fn render(&self, columns: &ColumnOrder, items: &[ProjectedItem], path: &Path) -> Result<()> {
        let file = File::create(path).map_err(ExportError::Io)?;
        let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| ExportError::render("xml", e.to_string()))?;

        writer
            .write_event(Event::Start(BytesStart::new("models")))
            .map_err(|e| ExportError::render("xml", e.to_string()))?;

        for item in items {
            writer
                .write_event(Event::Start(BytesStart::new("model")))
                .map_err(|e| ExportError::render("xml", e.to_string()))?;

            let tree = build_item_tree(columns, item);
            write_nodes(&mut writer, &tree)?;

            writer
                .write_event(Event::End(BytesEnd::new("model")))
                .map_err(|e| ExportError::render("xml", e.to_string()))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("models")))
            .map_err(|e| ExportError::render("xml", e.to_string()))?;

        Ok(())
    }
}
