//! DOCX exporter output-shape tests.

use snapdoc::export::{
    DocumentExporter, DocxExporter, ExportOptions, ExportRequest, SizeOption,
};

use crate::common::init_test_logging;
use crate::common::mocks::png_snapshot;

fn request(count: usize, title: Option<&str>, size: SizeOption) -> ExportRequest {
    let snapshots: Vec<_> = (0..count).map(|_| png_snapshot()).collect();
    ExportRequest::new(
        &snapshots,
        &ExportOptions::new(title.map(str::to_string), size),
    )
}

#[test]
fn artifact_is_a_zip_container() {
    init_test_logging();
    let artifact = DocxExporter::new()
        .export(&request(2, Some("Run 1"), SizeOption::Medium))
        .unwrap();

    assert!(artifact.bytes.len() > 4);
    assert_eq!(&artifact.bytes[..2], b"PK");
}

#[test]
fn file_name_derives_from_sanitized_title() {
    init_test_logging();
    let artifact = DocxExporter::new()
        .export(&request(1, Some("Run 1: Login Flow"), SizeOption::Medium))
        .unwrap();

    assert!(artifact.file_name.starts_with("run_1__login_flow_"));
    assert!(artifact.file_name.ends_with(".docx"));
}

#[test]
fn blank_title_uses_default() {
    init_test_logging();
    let artifact = DocxExporter::new()
        .export(&request(1, Some("   "), SizeOption::Medium))
        .unwrap();

    assert!(artifact.file_name.starts_with("test_run_snapshots_"));
}

#[test]
fn document_grows_with_each_block() {
    init_test_logging();
    let exporter = DocxExporter::new();
    let sizes: Vec<usize> = [1, 2, 4]
        .iter()
        .map(|&n| {
            exporter
                .export(&request(n, None, SizeOption::Small))
                .unwrap()
                .bytes
                .len()
        })
        .collect();

    assert!(sizes[0] < sizes[1]);
    assert!(sizes[1] < sizes[2]);
}

#[test]
fn undecodable_image_bytes_fail_the_export() {
    init_test_logging();
    use snapdoc::snapshot::{ImageFormat, Snapshot};

    let snapshots = vec![Snapshot::new(ImageFormat::Png, vec![1, 2, 3, 4])];
    let request = ExportRequest::new(
        &snapshots,
        &ExportOptions::new(None, SizeOption::Medium),
    );

    assert!(DocxExporter::new().export(&request).is_err());
}
