//! Text extraction from uploaded documents

use crate::error::{GapAnalyzerError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};

/// Turns the raw bytes of one document into its visible text.
pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Page-by-page PDF text. Pages are joined with no separator and a page
/// without a text layer contributes nothing.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| GapAnalyzerError::document_read("PDF", e))?;

        log::debug!("Extracted {} PDF pages", pages.len());
        Ok(pages.concat())
    }
}

/// Body paragraphs of a Word document, each followed by a single space.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut document_file = archive
            .by_name("word/document.xml")
            .map_err(|e| GapAnalyzerError::document_read("DOCX", format!("cannot find word/document.xml: {}", e)))?;

        let mut xml = String::new();
        document_file
            .read_to_string(&mut xml)
            .map_err(|e| GapAnalyzerError::document_read("DOCX", e))?;

        DocxExtractor::parse_document_xml(&xml)
    }
}

impl DocxExtractor {
    /// Walk `word/document.xml`. Only paragraphs that are direct children of
    /// `w:body` count, so tables, content controls and text boxes are skipped.
    /// A paragraph's text comes from its runs, including runs in hyperlinks.
    pub fn parse_document_xml(xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);

        let mut text = String::new();
        let mut paragraph = String::new();
        // Depth of the innermost open element; a Start at `depth` sits below it
        let mut depth = 0usize;
        let mut body_at: Option<usize> = None;
        let mut paragraph_at: Option<usize> = None;
        let mut hyperlink_at: Option<usize> = None;
        let mut run_at: Option<usize> = None;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(XmlEvent::Start(e)) => {
                    depth += 1;
                    match e.name().as_ref() {
                        b"w:body" if body_at.is_none() => body_at = Some(depth),
                        b"w:p" if body_at.map(|at| at + 1) == Some(depth) => {
                            paragraph_at = Some(depth);
                            paragraph.clear();
                        }
                        b"w:hyperlink" if paragraph_at.map(|at| at + 1) == Some(depth) => {
                            hyperlink_at = Some(depth)
                        }
                        b"w:r" if is_run_parent(depth, paragraph_at, hyperlink_at) => run_at = Some(depth),
                        b"w:t" if run_at.map(|at| at + 1) == Some(depth) => in_text = true,
                        _ => {}
                    }
                }
                Ok(XmlEvent::Empty(e)) => {
                    let at = depth + 1;
                    let in_run = run_at.map(|run| run + 1) == Some(at);
                    match e.name().as_ref() {
                        b"w:p" if body_at.map(|body| body + 1) == Some(at) => text.push(' '),
                        b"w:tab" if in_run => paragraph.push('\t'),
                        b"w:cr" if in_run => paragraph.push('\n'),
                        b"w:br" if in_run => {
                            let break_type = e
                                .attributes()
                                .flatten()
                                .find(|attr| attr.key.as_ref() == b"w:type")
                                .map(|attr| attr.value.into_owned());
                            // Page and column breaks carry no text
                            match break_type.as_deref() {
                                None | Some(b"textWrapping") => paragraph.push('\n'),
                                _ => {}
                            }
                        }
                        _ => {}
                    }
                }
                Ok(XmlEvent::End(e)) => {
                    match e.name().as_ref() {
                        b"w:t" if in_text && run_at.map(|at| at + 1) == Some(depth) => in_text = false,
                        b"w:r" if run_at == Some(depth) => run_at = None,
                        b"w:hyperlink" if hyperlink_at == Some(depth) => hyperlink_at = None,
                        b"w:p" if paragraph_at == Some(depth) => {
                            text.push_str(&paragraph);
                            text.push(' ');
                            paragraph.clear();
                            paragraph_at = None;
                        }
                        b"w:body" if body_at == Some(depth) => body_at = None,
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(XmlEvent::Text(e)) => {
                    if in_text {
                        let value = e
                            .unescape()
                            .map_err(|e| GapAnalyzerError::document_read("DOCX", e))?;
                        paragraph.push_str(&value);
                    }
                }
                Ok(XmlEvent::Eof) => break,
                Err(e) => {
                    return Err(GapAnalyzerError::document_read(
                        "DOCX",
                        format!("XML error at position {}: {}", reader.buffer_position(), e),
                    ))
                }
                _ => {}
            }
        }

        Ok(text)
    }
}

/// A run counts when it sits directly in the body paragraph or in one of its hyperlinks
fn is_run_parent(depth: usize, paragraph_at: Option<usize>, hyperlink_at: Option<usize>) -> bool {
    paragraph_at.map(|at| at + 1) == Some(depth) || hyperlink_at.map(|at| at + 1) == Some(depth)
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| GapAnalyzerError::InvalidInput(format!("Text is not valid UTF-8: {}", e)))
    }
}

/// Markdown job descriptions reduced to their text content, one block per line.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown = PlainTextExtractor.extract(bytes)?;
        Ok(self.markdown_to_text(&markdown))
    }
}

impl MarkdownExtractor {
    fn markdown_to_text(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(value) | Event::Code(value) => text.push_str(&value),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                Event::End(Tag::TableCell) => text.push(' '),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
