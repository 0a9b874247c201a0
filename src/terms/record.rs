//! Term record types

use serde::Serialize;
use std::collections::BTreeSet;

/// Category assigned when the sheet leaves column 4 blank or `null`.
///
/// The front-end compares against this exact string to hide the label.
pub const DEFAULT_CATEGORY: &str = "分类进行中";

/// One glossary entry, serialized as-is into the `/terms` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermRecord {
    pub abbreviation: String,
    pub english: String,
    pub chinese: String,
    pub category: String,
}

impl TermRecord {
    /// Build a record from the already-trimmed fields of one row.
    ///
    /// Returns `None` for rows with fewer than three fields.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        let [abbreviation, english, chinese, rest @ ..] = fields else {
            return None;
        };

        Some(Self {
            abbreviation: (*abbreviation).to_string(),
            english: (*english).to_string(),
            chinese: (*chinese).to_string(),
            category: normalize_category(rest.first().copied()),
        })
    }
}

fn normalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(category) if !category.is_empty() && !category.eq_ignore_ascii_case("null") => {
            category.to_string()
        }
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// Result of parsing one terms sheet
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermSheet {
    /// Records in source order
    pub records: Vec<TermRecord>,
    /// Distinct categories seen, for diagnostics only
    pub categories: BTreeSet<String>,
}

impl TermSheet {
    pub fn push(&mut self, record: TermRecord) {
        if !self.categories.contains(&record.category) {
            self.categories.insert(record.category.clone());
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_fields_keep_category() {
        let record = TermRecord::from_fields(&["ABC", "Alpha Beta Gamma", "阿尔法贝塔伽马", "Math"])
            .expect("record");
        assert_eq!(record.abbreviation, "ABC");
        assert_eq!(record.english, "Alpha Beta Gamma");
        assert_eq!(record.chinese, "阿尔法贝塔伽马");
        assert_eq!(record.category, "Math");
    }

    #[test]
    fn test_null_and_blank_category_default() {
        for raw in ["null", "NULL", "Null", "", "   "] {
            let record = TermRecord::from_fields(&["XY", "Foo", "福", raw]).expect("record");
            assert_eq!(record.category, DEFAULT_CATEGORY, "raw category {raw:?}");
        }
    }

    #[test]
    fn test_three_fields_default_category() {
        let record = TermRecord::from_fields(&["EQ", "Equalizer", "均衡器"]).expect("record");
        assert_eq!(record.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_too_few_fields() {
        assert!(TermRecord::from_fields(&["A", "B"]).is_none());
        assert!(TermRecord::from_fields(&[""]).is_none());
        assert!(TermRecord::from_fields(&[]).is_none());
    }

    #[test]
    fn test_category_not_nullish_substring() {
        let record = TermRecord::from_fields(&["N", "Nullifier", "消除器", "nullable"]).expect("record");
        assert_eq!(record.category, "nullable");
    }

    #[test]
    fn test_serialized_keys() {
        let record = TermRecord::from_fields(&["DB", "Decibel", "分贝", "Level"]).expect("record");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "abbreviation": "DB",
                "english": "Decibel",
                "chinese": "分贝",
                "category": "Level"
            })
        );
    }

    #[test]
    fn test_sheet_collects_distinct_categories() {
        let mut sheet = TermSheet::default();
        sheet.push(TermRecord::from_fields(&["A", "a", "甲", "Mix"]).expect("record"));
        sheet.push(TermRecord::from_fields(&["B", "b", "乙", "Mix"]).expect("record"));
        sheet.push(TermRecord::from_fields(&["C", "c", "丙"]).expect("record"));

        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.categories.len(), 2);
        assert!(sheet.categories.contains("Mix"));
        assert!(sheet.categories.contains(DEFAULT_CATEGORY));
    }

    #[test]
    fn test_front_end_hides_default_category() {
        let script = include_str!("../../static/script.js");
        assert!(script.contains(&format!("UNCATEGORIZED = '{DEFAULT_CATEGORY}'")));
        assert!(script.contains("term.category !== UNCATEGORIZED"));
    }
}
