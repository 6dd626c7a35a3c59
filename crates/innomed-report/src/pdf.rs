//! Minimal PDF writer built on `lopdf`: Helvetica text, A4 pages.

use anyhow::Context;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::layout::Line;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const LINE_HEIGHT: i64 = 16;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LINE_HEIGHT) as usize;

/// Base-14 fonts only cover Latin-1; everything else becomes `?`.
fn pdf_text(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

fn page_operations(lines: &[Line]) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("TL", vec![Object::Integer(LINE_HEIGHT)]),
        Operation::new("Td", vec![Object::Integer(MARGIN), Object::Integer(PAGE_HEIGHT - MARGIN)]),
    ];
    for line in lines {
        let (font, size, text) = match line {
            Line::Title(t)   => ("F2", 18, t.as_str()),
            Line::Heading(t) => ("F2", 13, t.as_str()),
            Line::Body(t)    => ("F1", 11, t.as_str()),
            Line::Blank      => ("F1", 11, ""),
        };
        ops.push(Operation::new("Tf", vec![font.into(), Object::Integer(size)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(pdf_text(text), lopdf::StringFormat::Literal)],
        ));
        ops.push(Operation::new("T*", vec![]));
    }
    ops.push(Operation::new("ET", vec![]));
    ops
}

/// Render laid-out lines into PDF bytes, paginating as needed.
pub fn render_pdf(lines: &[Line]) -> anyhow::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular, "F2" => bold },
    });

    let chunks: Vec<&[Line]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    let mut kids: Vec<ObjectId> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let content = Content { operations: page_operations(chunk) };
        let encoded = content.encode().context("encoding page content")?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        kids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
        "Count" => Object::Integer(count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf).context("serialising PDF")?;
    Ok(buf)
}
