//! Parse oracle output into contract records

use crate::error::ExtractorError;
use gazette_domain::{ActCode, ContractRecord};
use serde_json::{Map, Value};
use tracing::debug;

/// Parse the oracle response for the act identified by `act_code`
///
/// Missing keys become empty strings. A missing or blank
/// `codigo_identificador` falls back to `act_code`.
pub fn parse_contract_response(
    response: &str,
    act_code: &ActCode,
) -> Result<ContractRecord, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)?;
    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    let mut record = ContractRecord {
        contract_type: field(obj, "contract_type"),
        contract_number: field(obj, "contract_number"),
        addendum_number: field(obj, "addendum_number"),
        municipality: field(obj, "municipio"),
        contractor_tax_id: field(obj, "contractor_cnpj"),
        contractor_name: field(obj, "contractor_name"),
        contract_object: field(obj, "contract_object"),
        contract_value: field(obj, "contract_value"),
        term: field(obj, "term"),
        start_date: field(obj, "start_date"),
        end_date: field(obj, "end_date"),
        source_url: field(obj, "url"),
        publication_date: field(obj, "publication_date"),
        identifier_code: field(obj, "codigo_identificador"),
    };

    if record.identifier_code.trim().is_empty() {
        debug!("Response has no identifier code, using act code {}", act_code);
        record.identifier_code = act_code.to_string();
    }

    Ok(record)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    let Some(fenced) = trimmed.strip_prefix("```") else {
        return Ok(trimmed);
    };

    // The opening line holds the fence and an optional language tag
    let body = match fenced.split_once('\n') {
        Some((_tag, rest)) => rest,
        None => fenced,
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body).trim();

    if body.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
    }
    Ok(body)
}

/// Text value of a key; non-string scalars keep their JSON text
fn field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> ActCode {
        ActCode::parse("ABC123XYZ").unwrap()
    }

    const RAW: &str = r#"{
        "contract_type": "Contrato",
        "contract_number": "012/2024",
        "addendum_number": "",
        "municipio": "Manacapuru",
        "contractor_cnpj": "12.345.678/0001-90",
        "contractor_name": "Construtora Rio Negro Ltda",
        "contract_object": "Reforma da escola municipal",
        "contract_value": "R$ 150.000,00",
        "term": "12 meses",
        "start_date": "2024-04-01",
        "end_date": "2025-03-31",
        "url": "https://example.org/doe.pdf",
        "publication_date": "2024-04-04",
        "codigo_identificador": "ABC123XYZ"
    }"#;

    #[test]
    fn test_parse_full_object() {
        let record = parse_contract_response(RAW, &code()).unwrap();

        assert_eq!(record.contract_type, "Contrato");
        assert_eq!(record.municipality, "Manacapuru");
        assert_eq!(record.contractor_tax_id, "12.345.678/0001-90");
        assert_eq!(record.source_url, "https://example.org/doe.pdf");
        assert_eq!(record.identifier_code, "ABC123XYZ");
    }

    #[test]
    fn test_fenced_json_matches_unfenced() {
        let plain = parse_contract_response(RAW, &code()).unwrap();

        let tagged = format!("```json\n{}\n```", RAW);
        assert_eq!(parse_contract_response(&tagged, &code()).unwrap(), plain);

        let bare = format!("```\n{}\n```", RAW);
        assert_eq!(parse_contract_response(&bare, &code()).unwrap(), plain);
    }

    #[test]
    fn test_fence_tag_variants() {
        let plain = parse_contract_response(RAW, &code()).unwrap();

        for opening in ["``` json", "```JSON", "```Json", "```javascript", "```  json  "] {
            let fenced = format!("{}\n{}\n```", opening, RAW);
            let record = parse_contract_response(&fenced, &code())
                .unwrap_or_else(|e| panic!("fence '{}' failed: {}", opening, e));
            assert_eq!(record, plain);
        }
    }

    #[test]
    fn test_spaced_tag_keeps_identifier_code() {
        let response = "``` json\n{\"codigo_identificador\":\"DEF456UVW\"}\n```";
        let record = parse_contract_response(response, &code()).unwrap();
        assert_eq!(record.identifier_code, "DEF456UVW");
    }

    #[test]
    fn test_single_line_fence() {
        let response = "```{\"contract_type\": \"Aditivo\"}```";
        let record = parse_contract_response(response, &code()).unwrap();
        assert_eq!(record.contract_type, "Aditivo");
    }

    #[test]
    fn test_missing_keys_become_empty() {
        let record = parse_contract_response(r#"{"contract_type": "Aditivo"}"#, &code()).unwrap();
        assert_eq!(record.contract_type, "Aditivo");
        assert_eq!(record.contract_value, "");
        assert_eq!(record.end_date, "");
    }

    #[test]
    fn test_blank_code_falls_back_to_act_code() {
        let record =
            parse_contract_response(r#"{"codigo_identificador": "  "}"#, &code()).unwrap();
        assert_eq!(record.identifier_code, "ABC123XYZ");
    }

    #[test]
    fn test_non_string_values_keep_json_text() {
        let record = parse_contract_response(
            r#"{"contract_value": 150000.5, "term": null, "addendum_number": 2}"#,
            &code(),
        )
        .unwrap();
        assert_eq!(record.contract_value, "150000.5");
        assert_eq!(record.term, "");
        assert_eq!(record.addendum_number, "2");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = parse_contract_response("Desculpe, não encontrei o contrato.", &code());
        assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
    }

    #[test]
    fn test_array_is_invalid_format() {
        let result = parse_contract_response("[]", &code());
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_code_block() {
        let result = parse_contract_response("```json\n```", &code());
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }
}
