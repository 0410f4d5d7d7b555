//! Fixture builders shared by the integration tests.

#![allow(dead_code)]

use docnorm::tokenizer::{PosTagger, TaggedWord};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Splits on spaces and tags every word as a noun.
pub struct SpaceTagger;

impl PosTagger for SpaceTagger {
    fn tag(&self, text: &str) -> Vec<TaggedWord> {
        text.split(' ').map(|w| TaggedWord::new(w, "n")).collect()
    }

    fn name(&self) -> &'static str {
        "space"
    }
}

/// A DOCX paragraph for [`build_docx`].
pub struct Para<'a> {
    pub text: &'a str,
    pub style: Option<&'a str>,
    pub half_points: Option<u32>,
    pub centered: bool,
}

impl<'a> Para<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            style: None,
            half_points: None,
            centered: false,
        }
    }

    pub fn styled(text: &'a str, style: &'a str) -> Self {
        Self {
            style: Some(style),
            ..Self::plain(text)
        }
    }
}

fn paragraph_xml(para: &Para) -> String {
    let mut props = String::new();
    if let Some(style) = para.style {
        props.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, style));
    }
    if para.centered {
        props.push_str(r#"<w:jc w:val="center"/>"#);
    }
    let run_props = match para.half_points {
        Some(hp) => format!(r#"<w:rPr><w:b/><w:sz w:val="{}"/></w:rPr>"#, hp),
        None => String::new(),
    };
    format!(
        r#"<w:p><w:pPr>{}</w:pPr><w:r>{}<w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        props, run_props, para.text
    )
}

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
</w:styles>"#;

/// Build a DOCX archive from body paragraphs, table rows and an optional
/// declared title.
pub fn build_docx(paragraphs: &[Para], table: &[&[&str]], core_title: Option<&str>) -> Vec<u8> {
    let mut body = String::new();
    for para in paragraphs {
        body.push_str(&paragraph_xml(para));
    }
    if !table.is_empty() {
        body.push_str("<w:tbl>");
        for row in table {
            body.push_str("<w:tr>");
            for cell in row.iter() {
                body.push_str(&format!("<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>", cell));
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut files: Vec<(&str, String)> = vec![
        ("word/document.xml", document),
        ("word/styles.xml", STYLES_XML.to_string()),
    ];
    if let Some(title) = core_title {
        files.push((
            "docProps/core.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title></cp:coreProperties>"#,
                title
            ),
        ));
    }
    zip_files(&files)
}

/// Build a single-sheet XLSX using inline strings and numbers.
pub fn build_xlsx(rows: &[&[&str]]) -> Vec<u8> {
    build_workbook(&[("Budget", rows)])
}

fn sheet_xml(rows: &[&[&str]]) -> String {
    let mut sheet_rows = String::new();
    for (r, row) in rows.iter().enumerate() {
        sheet_rows.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
            if cell.parse::<f64>().is_ok() {
                sheet_rows.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, cell));
            } else {
                sheet_rows.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference, cell
                ));
            }
        }
        sheet_rows.push_str("</row>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        sheet_rows
    )
}

/// Build an XLSX with one worksheet per `(name, rows)` pair, in order.
pub fn build_workbook(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
    let mut overrides = String::new();
    let mut sheet_entries = String::new();
    let mut relationships = String::new();
    let mut files: Vec<(String, String)> = Vec::new();

    for (i, (name, rows)) in sheets.iter().enumerate() {
        let n = i + 1;
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            n
        ));
        sheet_entries.push_str(&format!(r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#, name, n, n));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            n, n
        ));
        files.push((format!("xl/worksheets/sheet{}.xml", n), sheet_xml(rows)));
    }

    let mut all: Vec<(String, String)> = vec![
        (
            "[Content_Types].xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{}</Types>"#,
                overrides
            ),
        ),
        (
            "_rels/.rels".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
                .to_string(),
        ),
        (
            "xl/workbook.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
                sheet_entries
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                relationships
            ),
        ),
    ];
    all.extend(files);

    let borrowed: Vec<(&str, String)> = all.iter().map(|(n, c)| (n.as_str(), c.clone())).collect();
    zip_files(&borrowed)
}

fn zip_files(files: &[(&str, String)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Build a one-page PDF (Letter, MediaBox inherited from the page tree)
/// with the given content stream and optional `/Info /Title`.
pub fn build_pdf(content: &str, info_title: Option<&str>) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 /MediaBox [0 0 612 792] >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
    ];
    if let Some(title) = info_title {
        objects.push(format!("<< /Title ({}) >>", title));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }

    let info = if info_title.is_some() {
        format!(" /Info {} 0 R", objects.len())
    } else {
        String::new()
    };
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R{} >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            info,
            xref_offset
        )
        .as_bytes(),
    );
    out
}
