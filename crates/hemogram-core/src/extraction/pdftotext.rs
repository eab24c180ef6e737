use crate::error::HemogramError;
use crate::extraction::{BBox, PageWords, TokenSource, WordToken};
use std::io::Write;
use std::process::Command;

/// Token source backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox`, which emits one `<word>` element per text
/// fragment with its bounding box, in the document's reading order.
pub struct PdftotextSource;

impl PdftotextSource {
    pub fn new() -> Self {
        PdftotextSource
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for PdftotextSource {
    fn read_words(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, HemogramError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| HemogramError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| HemogramError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HemogramError::PdftotextNotFound
                } else {
                    HemogramError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(HemogramError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        Ok(parse_bbox_xml(&xml))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse `pdftotext -bbox` XML into per-page word tokens.
///
/// Pages carry no number attribute in -bbox output; they are numbered by
/// order of appearance.
fn parse_bbox_xml(xml: &str) -> Vec<PageWords> {
    let mut pages: Vec<PageWords> = Vec::new();

    for raw in xml.lines() {
        let line = raw.trim();

        if line.starts_with("<page") {
            pages.push(PageWords {
                page_number: pages.len() + 1,
                words: Vec::new(),
            });
            continue;
        }

        if line.starts_with("<word ") {
            let (Some(bbox), Some(text)) = (parse_bbox(line), parse_word_text(line)) else {
                continue;
            };
            let text = decode_xml_entities(&text).trim().to_string();
            if text.is_empty() {
                continue;
            }
            if let Some(page) = pages.last_mut() {
                page.words.push(WordToken { text, bbox });
            }
        }
    }

    pages
}

fn parse_attr_f32(tag: &str, name: &str) -> Option<f32> {
    parse_attr(tag, name)?.parse().ok()
}

fn parse_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn parse_bbox(word_tag: &str) -> Option<BBox> {
    Some(BBox {
        x_min: parse_attr_f32(word_tag, "xMin")?,
        y_min: parse_attr_f32(word_tag, "yMin")?,
        x_max: parse_attr_f32(word_tag, "xMax")?,
        y_max: parse_attr_f32(word_tag, "yMax")?,
    })
}

fn parse_word_text(word_tag: &str) -> Option<String> {
    let start = word_tag.find('>')? + 1;
    let end = word_tag.rfind("</word>")?;
    Some(word_tag[start..end].to_string())
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}
