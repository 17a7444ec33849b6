//! Structured contract records produced by the oracle

/// Structured contract data extracted from one act
///
/// Only `identifier_code` is mandatory: it is the natural key downstream
/// consumers join on. Every other field may be an empty string when the
/// oracle did not report it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContractRecord {
    /// Kind of instrument (contract, addendum, ...)
    pub contract_type: String,

    /// Contract number as printed in the act
    pub contract_number: String,

    /// Addendum number, when the act is an addendum
    pub addendum_number: String,

    /// Municipality that signed the contract
    pub municipality: String,

    /// Contractor tax id (CNPJ/CPF)
    pub contractor_tax_id: String,

    /// Contractor name
    pub contractor_name: String,

    /// Object/description of the contract
    pub contract_object: String,

    /// Contract value as printed
    pub contract_value: String,

    /// Term (duration) of the contract
    pub term: String,

    /// Start date
    pub start_date: String,

    /// End date
    pub end_date: String,

    /// URL of the source publication
    pub source_url: String,

    /// Publication date of the gazette edition
    pub publication_date: String,

    /// Identifier code of the act this record came from
    pub identifier_code: String,
}

impl ContractRecord {
    /// Number of persisted fields
    pub const FIELD_COUNT: usize = 14;

    /// Field values in persistence order (the `contract_records` column order)
    pub fn values(&self) -> [&str; Self::FIELD_COUNT] {
        [
            &self.contract_type,
            &self.contract_number,
            &self.addendum_number,
            &self.municipality,
            &self.contractor_tax_id,
            &self.contractor_name,
            &self.contract_object,
            &self.contract_value,
            &self.term,
            &self.start_date,
            &self.end_date,
            &self.source_url,
            &self.publication_date,
            &self.identifier_code,
        ]
    }

    /// Validate that the record carries its natural key
    pub fn validate(&self) -> Result<(), String> {
        if self.identifier_code.trim().is_empty() {
            return Err("identifier_code is empty".to_string());
        }
        Ok(())
    }
}
