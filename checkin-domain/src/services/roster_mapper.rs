// Roster column mapping
// Resolves French/English header synonyms and validates each data row

use crate::entities::ImportedParticipant;
use crate::error::RosterError;
use crate::utils::normalize_email;

const FIRST_NAME_HEADERS: &[&str] = &["prénom", "prenom", "first name", "firstname"];
const LAST_NAME_HEADERS: &[&str] = &["nom", "last name", "lastname"];
const COMPANY_HEADERS: &[&str] = &["entreprise", "company", "société", "societe"];
const EMAIL_HEADERS: &[&str] = &["email", "e-mail", "mail"];

/// Column positions per field, in synonym priority order.
#[derive(Debug, Clone)]
pub struct RosterMapper {
    first_name: Vec<usize>,
    last_name: Vec<usize>,
    company: Vec<usize>,
    email: Vec<usize>,
}

impl RosterMapper {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, RosterError> {
        let normalized = headers
            .iter()
            .map(|header| normalize_header(header.as_ref()))
            .collect::<Vec<_>>();
        if normalized.iter().all(|header| header.is_empty()) {
            return Err(RosterError::MissingHeader);
        }
        Ok(Self {
            first_name: column_indexes(&normalized, FIRST_NAME_HEADERS),
            last_name: column_indexes(&normalized, LAST_NAME_HEADERS),
            company: column_indexes(&normalized, COMPANY_HEADERS),
            email: column_indexes(&normalized, EMAIL_HEADERS),
        })
    }

    /// Maps one data row; `row` is 1-based and only used in errors.
    pub fn map_row<S: AsRef<str>>(
        &self,
        row: usize,
        values: &[S],
    ) -> Result<ImportedParticipant, RosterError> {
        let first_name = pick(values, &self.first_name);
        let last_name = pick(values, &self.last_name);
        if first_name.is_empty() || last_name.is_empty() {
            return Err(RosterError::MissingNames { row });
        }
        let email = pick(values, &self.email);
        if email.is_empty() {
            return Err(RosterError::MissingEmail { row });
        }
        Ok(ImportedParticipant {
            first_name,
            last_name,
            company: pick(values, &self.company),
            email: normalize_email(&email),
        })
    }
}

fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn column_indexes(headers: &[String], synonyms: &[&str]) -> Vec<usize> {
    synonyms
        .iter()
        .filter_map(|synonym| headers.iter().position(|header| header == synonym))
        .collect()
}

fn pick<S: AsRef<str>>(values: &[S], columns: &[usize]) -> String {
    columns
        .iter()
        .filter_map(|&index| values.get(index))
        .map(|value| value.as_ref().trim())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}
