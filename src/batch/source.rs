use std::fs::File;
use std::path::Path;

use crate::core::constants::columns;
use crate::core::{AuditError, DomainRecord, Result};

/// Domains from a CSV file with a `Domain` column, tagged with their 0-based
/// row position.
///
/// Rows are read as raw bytes and only the `Domain` cell is decoded, lossily,
/// so undecodable bytes never stop the batch at a fixed index.
pub struct DomainSource {
    records: csv::ByteRecordsIntoIter<File>,
    column: usize,
    next_index: u64,
}

impl DomainSource {
    pub fn open(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let column = domain_column(&mut reader, path)?;

        Ok(Self {
            records: reader.into_byte_records(),
            column,
            next_index: 0,
        })
    }
}

impl Iterator for DomainSource {
    type Item = Result<DomainRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err.into())),
        };

        // Short rows still take up an index so positions stay stable
        let domain = record.get(self.column).unwrap_or(b"");
        let item = DomainRecord::new(self.next_index, String::from_utf8_lossy(domain));
        self.next_index += 1;
        Some(Ok(item))
    }
}

/// Number of domain rows in the file at `path`, not counting the header.
pub fn count_domains(path: &Path) -> Result<u64> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    domain_column(&mut reader, path)?;

    let mut count = 0;
    let mut record = csv::ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        count += 1;
    }
    Ok(count)
}

fn domain_column(reader: &mut csv::Reader<File>, path: &Path) -> Result<usize> {
    reader
        .headers()?
        .iter()
        .position(|h| h == columns::DOMAIN)
        .ok_or_else(|| AuditError::MissingColumn {
            path: path.display().to_string(),
            column: columns::DOMAIN.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn sites_with(content: &str) -> std::result::Result<tempfile::NamedTempFile, Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_domain_source__indexes_rows_in_order() -> TestResult {
        let file = sites_with("Domain\ngoogle.com\nfacebook.com\nyoutube.com\n")?;

        let records = DomainSource::open(file.path())?.collect::<Result<Vec<_>>>()?;

        assert_eq!(
            records,
            vec![
                DomainRecord::new(0, "google.com"),
                DomainRecord::new(1, "facebook.com"),
                DomainRecord::new(2, "youtube.com"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_domain_source__picks_domain_column_among_others() -> TestResult {
        let file = sites_with(
            "GlobalRank,TldRank,Domain,TLD\n1,1,google.com,com\n2,2,facebook.com,com\n",
        )?;

        let domains: Vec<String> = DomainSource::open(file.path())?
            .map(|r| r.map(|record| record.domain))
            .collect::<Result<_>>()?;

        assert_eq!(domains, vec!["google.com", "facebook.com"]);
        Ok(())
    }

    #[test]
    fn test_domain_source__missing_column() -> TestResult {
        let file = sites_with("Site\ngoogle.com\n")?;

        let err = DomainSource::open(file.path()).err().expect("open should fail");

        assert!(matches!(err, AuditError::MissingColumn { .. }));
        Ok(())
    }

    #[test]
    fn test_domain_source__short_row_keeps_its_index() -> TestResult {
        let file = sites_with("Rank,Domain\n1,a.com\n2\n3,c.com\n")?;

        let records = DomainSource::open(file.path())?.collect::<Result<Vec<_>>>()?;

        assert_eq!(records[1], DomainRecord::new(1, ""));
        assert_eq!(records[2], DomainRecord::new(2, "c.com"));
        Ok(())
    }

    #[test]
    fn test_domain_source__invalid_utf8_does_not_stop_reading() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"Domain,Note\na.com,x\nb.com,\xff\nc\xfe.com,y\nd.com,z\n")?;

        let records = DomainSource::open(file.path())?.collect::<Result<Vec<_>>>()?;

        assert_eq!(records.len(), 4);
        assert_eq!(records[1], DomainRecord::new(1, "b.com"));
        assert_eq!(records[2], DomainRecord::new(2, "c\u{FFFD}.com"));
        assert_eq!(records[3], DomainRecord::new(3, "d.com"));
        assert_eq!(count_domains(file.path())?, 4);
        Ok(())
    }

    #[test]
    fn test_count_domains() -> TestResult {
        let file = sites_with("Domain\na.com\nb.com\nc.com\n")?;
        assert_eq!(count_domains(file.path())?, 3);

        let empty = sites_with("Domain\n")?;
        assert_eq!(count_domains(empty.path())?, 0);
        Ok(())
    }

    #[test]
    fn test_count_domains__missing_file() {
        let result = count_domains(Path::new("non_existing_sites.csv"));

        assert!(result.is_err());
    }
}
