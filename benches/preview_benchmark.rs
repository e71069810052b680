//! Benchmarks for docpeek preview performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic documents built in memory.

use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lopdf::{dictionary, Document, Object};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn zip_parts(parts: &[(&str, String)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Creates a PDF with the given number of blank pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            doc.add_object(dictionary! { "Type" => "Page", "Parent" => pages_id })
                .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Creates a DOCX with headings, body paragraphs and one table.
fn create_test_docx(paragraphs: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..paragraphs {
        let style = if i % 10 == 0 {
            r#"<w:pPr><w:pStyle w:val="Heading1"/></w:pPr>"#
        } else {
            ""
        };
        body.push_str(&format!(
            "<w:p>{}<w:r><w:t>Paragraph {} of the benchmark document.</w:t></w:r></w:p>",
            style, i
        ));
    }
    body.push_str("<w:tbl>");
    for row in 0..20 {
        body.push_str(&format!(
            "<w:tr><w:tc><w:p><w:r><w:t>r{}</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc></w:tr>",
            row,
            row * 3
        ));
    }
    body.push_str("</w:tbl>");

    let document = format!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );
    zip_parts(&[("word/document.xml", document)])
}

/// Creates a PPTX with `slides` slides of 12 text boxes each.
fn create_test_pptx(slides: usize) -> Vec<u8> {
    let ids: String = (0..slides)
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 1))
        .collect();
    let rels: String = (0..slides)
        .map(|i| {
            format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 1,
                i + 1
            )
        })
        .collect();

    let mut parts = vec![
        (
            "ppt/presentation.xml".to_string(),
            format!(
                r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
                ids
            ),
        ),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            format!("<Relationships>{}</Relationships>", rels),
        ),
    ];
    for n in 1..=slides {
        let shapes: String = (0..12)
            .map(|i| {
                format!(
                    "<p:sp><p:nvSpPr><p:cNvPr id=\"{}\" name=\"TextBox\"/></p:nvSpPr><p:txBody><a:p><a:r><a:t>Slide {} bullet {} with some longer explanatory text</a:t></a:r></a:p></p:txBody></p:sp>",
                    i + 2,
                    n,
                    i
                )
            })
            .collect();
        parts.push((
            format!("ppt/slides/slide{}.xml", n),
            format!(
                r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
                shapes
            ),
        ));
    }

    let borrowed: Vec<(&str, String)> = parts
        .iter()
        .map(|(name, content)| (name.as_str(), content.clone()))
        .collect();
    zip_parts(&borrowed)
}

/// Benchmark content type lookup and dispatch overhead.
fn bench_dispatch(c: &mut Criterion) {
    c.bench_function("resolve_content_type", |b| {
        b.iter(|| docpeek::resolve_content_type(black_box("PPTX")));
    });

    c.bench_function("previewer_creation", |b| {
        b.iter(docpeek::Previewer::new);
    });
}

/// Benchmark PDF page counting at various sizes.
fn bench_pdf_info(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_info");

    for page_count in [1, 10, 100].iter() {
        let data = create_test_pdf(*page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| docpeek::describe(black_box(&data), "pdf"));
        });
    }

    group.finish();
}

/// Benchmark DOCX to HTML conversion.
fn bench_docx_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_preview");
    let previewer = docpeek::Previewer::new();

    for paragraphs in [10, 100, 1000].iter() {
        let data = create_test_docx(*paragraphs);
        group.bench_function(format!("{}_paragraphs", paragraphs), |b| {
            b.iter(|| previewer.produce_preview(black_box(&data), "docx", None).unwrap());
        });
    }

    group.finish();
}

/// Benchmark slide rasterization and PNG encoding.
fn bench_slide_preview(c: &mut Criterion) {
    let previewer = docpeek::Previewer::new();
    let data = create_test_pptx(20);

    c.bench_function("slide_preview", |b| {
        b.iter(|| {
            previewer
                .produce_preview(black_box(&data), "pptx", Some(10))
                .unwrap()
        });
    });

    c.bench_function("slide_error_placeholder", |b| {
        b.iter(|| {
            previewer
                .produce_preview(black_box(b"not a presentation"), "pptx", None)
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_dispatch,
    bench_pdf_info,
    bench_docx_preview,
    bench_slide_preview,
);
criterion_main!(benches);
