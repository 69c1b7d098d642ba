//! DOCX document exporter.
//!
//! Serializes an export request into an OOXML word-processing document:
//! a heading, a generation line, then one caption + image pair per
//! snapshot in capture order.

use std::io::Cursor;

use docx_rs::{Docx, LineSpacing, Paragraph, Pic, Run, Style, StyleType};
use tracing::debug;

use super::{Artifact, DocumentExporter, ExportRequest, artifact_file_name};
use crate::error::{Result, SnapError};

// OOXML image extents are in English Metric Units.
const EMU_PER_PIXEL: u32 = 9525;

// Paragraph spacing in twentieths of a point.
const SPACING_SECTION: u32 = 400;
const SPACING_CAPTION: u32 = 200;

/// Exporter producing `.docx` artifacts.
#[derive(Debug, Default)]
pub struct DocxExporter;

impl DocxExporter {
    /// Create a new exporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExporter for DocxExporter {
    fn export(&self, request: &ExportRequest) -> Result<Artifact> {
        debug!(
            title = %request.title,
            blocks = request.blocks.len(),
            "Assembling document"
        );

        let mut doc = Docx::new()
            .add_style(
                Style::new("Heading1", StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_paragraph(
                Paragraph::new()
                    .style("Heading1")
                    .add_run(Run::new().add_text(request.title.as_str())),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(format!(
                        "Generated on: {}",
                        request.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )))
                    .line_spacing(LineSpacing::new().after(SPACING_SECTION)),
            );

        for block in &request.blocks {
            // Embedding undecodable bytes would yield a document that opens
            // but renders broken images; fail the export up front instead.
            image::load_from_memory(&block.bytes).map_err(|e| {
                SnapError::ExportFailed(format!("{}: invalid image data: {e}", block.caption))
            })?;

            doc = doc
                .add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text(block.caption.as_str()))
                        .line_spacing(
                            LineSpacing::new()
                                .before(SPACING_SECTION)
                                .after(SPACING_CAPTION),
                        ),
                )
                .add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_image(Pic::new(&block.bytes).size(
                            block.width * EMU_PER_PIXEL,
                            block.height * EMU_PER_PIXEL,
                        )))
                        .line_spacing(LineSpacing::new().after(SPACING_SECTION)),
                );
        }

        let mut cursor = Cursor::new(Vec::new());
        doc.build()
            .pack(&mut cursor)
            .map_err(|e| SnapError::ExportFailed(format!("failed to pack document: {e}")))?;

        Ok(Artifact {
            file_name: artifact_file_name(&request.title, request.generated_at),
            bytes: cursor.into_inner(),
        })
    }
}
