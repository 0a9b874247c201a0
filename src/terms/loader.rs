//! Terms sheet loader
//!
//! The sheet is GBK text: one header line, then one term per line with
//! tab-separated `abbreviation`, `english`, `chinese` and an optional `category`.

use encoding_rs::GBK;
use std::path::Path;
use tokio::fs;

use super::record::{TermRecord, TermSheet};
use super::TermsError;

/// Decode GBK bytes, replacing undecodable sequences with U+FFFD
pub fn decode_gbk(bytes: &[u8]) -> String {
    let (text, had_errors) = GBK.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::warn!("terms sheet contains bytes that are not valid GBK; replaced");
    }
    text.into_owned()
}

/// Parse decoded sheet text.
///
/// The first line is the header and is always dropped. Rows with fewer than
/// three fields are skipped without being reported.
pub fn parse_terms(text: &str) -> TermSheet {
    let mut sheet = TermSheet::default();
    let mut skipped = 0usize;

    for line in text.lines().skip(1) {
        let fields: Vec<&str> = line.trim().split('\t').map(str::trim).collect();
        match TermRecord::from_fields(&fields) {
            Some(record) => sheet.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "dropped short rows from terms sheet");
    }
    sheet
}

/// Read and parse the terms sheet at `path`.
///
/// Any I/O failure yields [`TermsError::DataUnavailable`]; no partial sheet
/// is returned in that case.
pub async fn load_terms(path: &Path) -> Result<TermSheet, TermsError> {
    let bytes = fs::read(path)
        .await
        .map_err(|source| TermsError::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    let sheet = parse_terms(&decode_gbk(&bytes));
    tracing::debug!(
        path = %path.display(),
        records = sheet.len(),
        categories = ?sheet.categories,
        "parsed terms sheet"
    );
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::DEFAULT_CATEGORY;

    const HEADER: &str = "缩写\t英文\t中文\t分类";

    fn gbk(text: &str) -> Vec<u8> {
        let (bytes, _, unmappable) = GBK.encode(text);
        assert!(!unmappable, "test text must be representable in GBK");
        bytes.into_owned()
    }

    #[test]
    fn test_rows_in_file_order() {
        let text = format!(
            "{HEADER}\nABC\tAlpha Beta Gamma\t阿尔法贝塔伽马\tMath\nXY\tFoo\t福\tnull\nEQ\tEqualizer\t均衡器\tMixing\n"
        );
        let sheet = parse_terms(&text);

        let abbreviations: Vec<&str> = sheet
            .records
            .iter()
            .map(|r| r.abbreviation.as_str())
            .collect();
        assert_eq!(abbreviations, ["ABC", "XY", "EQ"]);
        assert_eq!(sheet.records[0].category, "Math");
        assert_eq!(sheet.records[1].category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_short_rows_excluded_from_records_and_categories() {
        let text = format!("{HEADER}\nA\tB\tOnlyHere\nA\tB\nC\tD\t丁\tKept\n\n");
        let sheet = parse_terms(&text);

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.records[0].chinese, "OnlyHere");
        assert_eq!(sheet.records[1].abbreviation, "C");
        let categories: Vec<&str> = sheet.categories.iter().map(String::as_str).collect();
        assert_eq!(categories, ["Kept", DEFAULT_CATEGORY]);
    }

    #[test]
    fn test_trailing_tab_does_not_make_a_third_field() {
        let sheet = parse_terms(&format!("{HEADER}\nA\tB\t\n"));
        assert!(sheet.is_empty());
        assert!(sheet.categories.is_empty());
    }

    #[test]
    fn test_fields_trimmed_and_crlf_handled() {
        let sheet = parse_terms(&format!("{HEADER}\r\n  LPF \t Low Pass Filter\t 低通滤波器 \t Filter \r\n"));
        assert_eq!(
            sheet.records,
            vec![TermRecord {
                abbreviation: "LPF".to_string(),
                english: "Low Pass Filter".to_string(),
                chinese: "低通滤波器".to_string(),
                category: "Filter".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_and_header_only() {
        assert!(parse_terms("").is_empty());
        assert!(parse_terms(HEADER).is_empty());
        assert!(parse_terms(&format!("{HEADER}\n")).is_empty());
    }

    #[test]
    fn test_header_is_dropped_even_if_it_looks_like_data() {
        let sheet = parse_terms("H1\tH2\tH3\tH4\nR1\tR2\tR3\tR4");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.records[0].abbreviation, "R1");
    }

    #[test]
    fn test_decode_gbk() {
        assert_eq!(decode_gbk(&gbk("阿尔法贝塔伽马")), "阿尔法贝塔伽马");
    }

    #[test]
    fn test_decode_gbk_replaces_invalid_bytes() {
        let mut bytes = gbk("福");
        bytes.push(0xFF);
        bytes.extend_from_slice(b"ok");
        let text = decode_gbk(&bytes);
        assert!(text.starts_with('福'));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.ends_with("ok"));
    }

    #[tokio::test]
    async fn test_load_terms_from_gbk_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("terms.txt");
        let text = format!("{HEADER}\nABC\tAlpha Beta Gamma\t阿尔法贝塔伽马\tMath\nA\tB\n");
        std::fs::write(&path, gbk(&text)).expect("write sheet");

        let sheet = load_terms(&path).await.expect("load");
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.records[0].chinese, "阿尔法贝塔伽马");
        assert_eq!(sheet.records[0].category, "Math");
    }

    #[tokio::test]
    async fn test_load_terms_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.txt");

        let err = load_terms(&path).await.expect_err("missing file must fail");
        let TermsError::DataUnavailable { path: failed, .. } = err;
        assert_eq!(failed, path);
    }
}
