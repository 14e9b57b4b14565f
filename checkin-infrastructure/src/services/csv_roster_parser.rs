use csv::{ReaderBuilder, StringRecord, Trim};

use checkin_domain::{ImportedParticipant, RosterError, RosterMapper, RosterParser};

/// Parses spreadsheet exports saved as CSV. Comma and semicolon separated
/// files are both accepted; the separator is taken from the header line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvRosterParser;

impl CsvRosterParser {
    pub fn new() -> Self {
        Self
    }
}

impl RosterParser for CsvRosterParser {
    fn parse(&self, content: &[u8]) -> Result<Vec<ImportedParticipant>, RosterError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(sniff_delimiter(content))
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|err| RosterError::Unreadable(err.to_string()))?
            .clone();
        let mapper = RosterMapper::from_headers(&headers.iter().collect::<Vec<_>>())?;

        let mut participants = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|err| RosterError::Unreadable(err.to_string()))?;
            if is_blank(&record) {
                continue;
            }
            let values = record.iter().collect::<Vec<_>>();
            participants.push(mapper.map_row(index + 1, &values)?);
        }
        Ok(participants)
    }
}

fn sniff_delimiter(content: &[u8]) -> u8 {
    let header = content
        .split(|byte| *byte == b'\n')
        .next()
        .unwrap_or_default();
    let semicolons = header.iter().filter(|byte| **byte == b';').count();
    let commas = header.iter().filter(|byte| **byte == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|value| value.trim().is_empty())
}
