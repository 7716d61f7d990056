//! Personal-info rows and card read-out reports

use std::fmt;

use bytes::Bytes;

/// One row of the personal-info file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersoRow {
    /// Row index, starting at 1
    pub index: u8,
    /// Row text, `None` when the row could not be read
    pub content: Option<String>,
}

impl PersoRow {
    /// Row read successfully
    pub fn read(index: u8, data: &[u8]) -> Self {
        Self {
            index,
            content: Some(String::from_utf8_lossy(data).into_owned()),
        }
    }

    /// Row that could not be read
    pub const fn missing(index: u8) -> Self {
        Self {
            index,
            content: None,
        }
    }
}

impl fmt::Display for PersoRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " {:2}: {}",
            self.index,
            self.content.as_deref().unwrap_or("No info")
        )
    }
}

/// Everything read from one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReport {
    /// Name of the matched profile
    pub profile: &'static str,
    /// Document number, for cards that expose it
    pub document_number: Option<String>,
    /// Personal-info rows, in index order
    pub rows: Vec<PersoRow>,
    /// Authentication certificate (DER)
    pub auth_cert: Bytes,
    /// Signing certificate (DER)
    pub sign_cert: Bytes,
}

impl fmt::Display for CardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(document_number) = &self.document_number {
            writeln!(f, "Document NR: {}", document_number)?;
        }
        writeln!(f, "Perso file:")?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        writeln!(f, "Auth cert: {}", hex::encode(&self.auth_cert))?;
        write!(f, "Sign cert: {}", hex::encode(&self.sign_cert))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_display() {
        assert_eq!(PersoRow::read(3, b"JOHN").to_string(), "  3: JOHN");
        assert_eq!(PersoRow::read(12, b"EST").to_string(), " 12: EST");
        assert_eq!(PersoRow::missing(5).to_string(), "  5: No info");
    }

    #[test]
    fn test_row_lossy_text() {
        let row = PersoRow::read(1, &[0x4A, 0xFF, 0x4B]);
        assert_eq!(row.content.as_deref(), Some("J\u{FFFD}K"));
    }

    #[test]
    fn test_report_display() {
        let report = CardReport {
            profile: "IDEMIA Cosmo",
            document_number: Some("AB0123456".to_string()),
            rows: vec![PersoRow::read(1, b"DOE"), PersoRow::missing(2)],
            auth_cert: Bytes::from_static(&[0x30, 0x82]),
            sign_cert: Bytes::from_static(&[0xAB]),
        };

        assert_eq!(
            report.to_string(),
            "Document NR: AB0123456\nPerso file:\n  1: DOE\n  2: No info\nAuth cert: 3082\nSign cert: ab"
        );

        let report = CardReport {
            document_number: None,
            rows: vec![],
            ..report
        };
        assert!(report.to_string().starts_with("Perso file:\n"));
    }
}
