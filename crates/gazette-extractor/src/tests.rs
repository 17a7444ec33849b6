//! Integration tests for the Processor

#[cfg(test)]
mod tests {
    use crate::{DocumentOutcome, ExtractorConfig, Processor};
    use gazette_domain::traits::{
        ContractSink, DeadLetterLog, DocumentSource, ProcessedTracker,
    };
    use gazette_domain::{ContractRecord, DeadLetter, Document, FailureStage, ProcessedMarker};
    use gazette_llm::MockProvider;
    use gazette_store::{SqliteStore, StoreError};

    /// Documents held in memory, listed in insertion order
    #[derive(Default)]
    struct InMemorySource {
        documents: Vec<Document>,
    }

    impl InMemorySource {
        fn with(mut self, document: Document) -> Self {
            self.documents.push(document);
            self
        }
    }

    impl DocumentSource for InMemorySource {
        type Error = String;

        fn list_ids(&self, limit: usize) -> Result<Vec<String>, Self::Error> {
            Ok(self.documents.iter().take(limit).map(|d| d.id.clone()).collect())
        }

        fn fetch(&self, id: &str) -> Result<Document, Self::Error> {
            self.documents
                .iter()
                .find(|d| d.id == id)
                .cloned()
                .ok_or_else(|| format!("Document not found: {}", id))
        }
    }

    /// SQLite store that can be told to fail
    struct FlakyStore {
        inner: SqliteStore,
        fail_checks: bool,
        fail_saves: bool,
    }

    impl FlakyStore {
        fn new() -> Self {
            Self {
                inner: SqliteStore::new(":memory:").unwrap(),
                fail_checks: false,
                fail_saves: false,
            }
        }
    }

    impl ProcessedTracker for FlakyStore {
        type Error = StoreError;

        fn is_processed(&self, document_id: &str) -> Result<bool, Self::Error> {
            if self.fail_checks {
                return Err(StoreError::InvalidData("connection lost".to_string()));
            }
            self.inner.is_processed(document_id)
        }

        fn mark_processed(&mut self, marker: ProcessedMarker) -> Result<(), Self::Error> {
            self.inner.mark_processed(marker)
        }
    }

    impl ContractSink for FlakyStore {
        type Error = StoreError;

        fn save(&mut self, record: ContractRecord) -> Result<(), Self::Error> {
            if self.fail_saves {
                return Err(StoreError::InvalidData("disk full".to_string()));
            }
            self.inner.save(record)
        }
    }

    impl DeadLetterLog for FlakyStore {
        type Error = StoreError;

        fn record(&mut self, letter: DeadLetter) -> Result<(), Self::Error> {
            self.inner.record(letter)
        }
    }

    const HEADER: &str = "Amazonas, Quinta-feira, 4 de Abril de 2024\n\
                          Diário Oficial dos Municípios do Estado do Amazonas • ANO XV";

    fn contract_act(number: &str, code: &str) -> String {
        format!(
            "EXTRATO DO CONTRATO Nº {}/2024\n\
             Contratada: Construtora Rio Negro Ltda, CNPJ 12.345.678/0001-90.\n\
             Objeto: Reforma da escola municipal.\n\
             Código Identificador: {}\n",
            number, code
        )
    }

    fn contract_json(code: &str) -> String {
        format!(
            r#"{{"contract_type": "Contrato", "contract_number": "012/2024",
                "municipio": "Manacapuru", "contractor_name": "Construtora Rio Negro Ltda",
                "contract_value": "R$ 150.000,00", "codigo_identificador": "{}"}}"#,
            code
        )
    }

    fn gazette(id: &str, body: &str) -> Document {
        Document::new(id, format!("{}\n{}", HEADER, body))
            .with_metadata("idPost", "5521")
            .with_metadata("postDate", "2024-04-04")
            .with_metadata("postTitle", "Prefeitura Municipal de Manacapuru")
    }

    fn processor(
        source: InMemorySource,
        llm: &MockProvider,
        config: ExtractorConfig,
    ) -> Processor<InMemorySource, MockProvider, FlakyStore> {
        Processor::new(source, llm.clone(), FlakyStore::new(), config).unwrap()
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_full_processing_flow() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", &contract_act("012", "ABC123XYZ")));
        let llm = MockProvider::new(contract_json("ABC123XYZ"));
        let mut processor = processor(source, &llm, ExtractorConfig::default());

        let report = processor.run(&ids(&["doc-1"]));

        let doc = &report.documents[0];
        assert_eq!(doc.outcome, DocumentOutcome::Processed);
        assert_eq!(doc.acts_found, 1);
        assert_eq!(doc.records_saved, 1);
        assert!(doc.marked);

        let store = &processor.store().inner;
        let stored = store.contracts_by_code("ABC123XYZ").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].municipality, "Manacapuru");
        assert!(store.is_processed("doc-1").unwrap());

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Ato: EXTRATO DO CONTRATO Nº 012/2024"));
        assert!(prompts[0].contains("Código: ABC123XYZ"));
        assert!(prompts[0].contains("    idPost: 5521"));
        assert!(prompts[0].contains("    URL: Não disponível"));
        assert!(!prompts[0].contains("Diário Oficial dos Municípios"));
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", &contract_act("012", "ABC123XYZ")));
        let llm = MockProvider::new(contract_json("ABC123XYZ"));
        let mut processor = processor(source, &llm, ExtractorConfig::default());

        processor.run(&ids(&["doc-1"]));
        let calls_after_first_run = llm.call_count();

        let report = processor.run(&ids(&["doc-1"]));

        assert_eq!(report.documents[0].outcome, DocumentOutcome::AlreadyProcessed);
        assert!(!report.documents[0].marked);
        assert_eq!(llm.call_count(), calls_after_first_run);
        assert_eq!(processor.store().inner.contract_count().unwrap(), 1);
    }

    #[test]
    fn test_malformed_reply_does_not_stop_siblings() {
        let body = format!(
            "{}{}",
            contract_act("001", "AAA111AAA"),
            contract_act("002", "BBB222BBB")
        );
        let source = InMemorySource::default().with(gazette("doc-1", &body));
        let llm = MockProvider::new("unused");
        llm.push_response("Não foi possível extrair o contrato.");
        llm.push_response(format!("```json\n{}\n```", contract_json("BBB222BBB")));
        let mut processor = processor(source, &llm, ExtractorConfig::default());

        let report = processor.run(&ids(&["doc-1"]));

        let doc = &report.documents[0];
        assert_eq!(doc.acts_in_scope, 2);
        assert_eq!(doc.records_saved, 1);
        assert_eq!(doc.failures.len(), 1);
        assert_eq!(doc.failures[0].act_code, "AAA111AAA");
        assert_eq!(doc.failures[0].stage, FailureStage::Parse);
        assert!(doc.marked);

        let store = &processor.store().inner;
        assert_eq!(store.contract_count().unwrap(), 1);
        assert_eq!(store.contracts_by_code("BBB222BBB").unwrap().len(), 1);
        assert!(store.is_processed("doc-1").unwrap());

        let letters = store.dead_letters("doc-1").unwrap();
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].act_code, "AAA111AAA");
        assert_eq!(letters[0].stage, FailureStage::Parse);
    }

    #[test]
    fn test_oracle_failure_is_dead_lettered() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", &contract_act("012", "ABC123XYZ")));
        let llm = MockProvider::new(contract_json("ABC123XYZ"));
        llm.push_error("run expired");
        let mut processor = processor(source, &llm, ExtractorConfig::default());

        let report = processor.run(&ids(&["doc-1"]));

        let doc = &report.documents[0];
        assert_eq!(doc.records_saved, 0);
        assert_eq!(doc.failures[0].stage, FailureStage::Extraction);
        assert!(doc.failures[0].reason.contains("run expired"));
        assert!(doc.marked);

        let letters = processor.store().inner.dead_letters("doc-1").unwrap();
        assert_eq!(letters[0].stage, FailureStage::Extraction);
    }

    #[test]
    fn test_dead_letters_can_be_disabled() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", &contract_act("012", "ABC123XYZ")));
        let llm = MockProvider::new("not json");
        let config = ExtractorConfig {
            record_dead_letters: false,
            ..ExtractorConfig::default()
        };
        let mut processor = processor(source, &llm, config);

        let report = processor.run(&ids(&["doc-1"]));

        assert_eq!(report.act_failures(), 1);
        assert!(processor.store().inner.dead_letters("doc-1").unwrap().is_empty());
    }

    #[test]
    fn test_save_failure_is_isolated() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", &contract_act("012", "ABC123XYZ")));
        let llm = MockProvider::new(contract_json("ABC123XYZ"));
        let mut processor = processor(source, &llm, ExtractorConfig::default());
        processor.store_mut().fail_saves = true;

        let report = processor.run(&ids(&["doc-1"]));

        let doc = &report.documents[0];
        assert_eq!(doc.failures[0].stage, FailureStage::Persist);
        assert!(doc.marked);
        assert_eq!(processor.store().inner.contract_count().unwrap(), 0);
    }

    #[test]
    fn test_out_of_scope_acts_skip_the_oracle() {
        let body = "EXTRATO DE CONVÊNIO Nº 3/2024\nCódigo Identificador: CCC333CCC\n\
                    PORTARIA Nº 45\nNomeia servidor.\nCódigo Identificador: DDD444DDD\n";
        let source = InMemorySource::default().with(gazette("doc-1", body));
        let llm = MockProvider::new(contract_json("CCC333CCC"));
        let mut processor = processor(source, &llm, ExtractorConfig::default());

        let report = processor.run(&ids(&["doc-1"]));

        let doc = &report.documents[0];
        assert_eq!(doc.acts_found, 2);
        assert_eq!(doc.acts_in_scope, 0);
        assert!(doc.marked);
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_document_without_acts_is_left_unmarked() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", "Sem atos publicados nesta página."));
        let llm = MockProvider::default();
        let mut processor = processor(source, &llm, ExtractorConfig::default());

        let report = processor.run(&ids(&["doc-1"]));

        assert_eq!(report.documents[0].outcome, DocumentOutcome::NoActs);
        assert!(!report.documents[0].marked);
        assert!(!processor.store().inner.is_processed("doc-1").unwrap());
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_document_without_acts_can_be_marked() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", "Sem atos publicados nesta página."));
        let llm = MockProvider::default();
        let config = ExtractorConfig {
            mark_empty_documents: true,
            ..ExtractorConfig::default()
        };
        let mut processor = processor(source, &llm, config);

        let report = processor.run(&ids(&["doc-1"]));

        assert_eq!(report.documents[0].outcome, DocumentOutcome::NoActs);
        assert!(report.documents[0].marked);
        assert!(processor.store().inner.is_processed("doc-1").unwrap());
    }

    #[test]
    fn test_fetch_failure_is_isolated_and_unmarked() {
        let source = InMemorySource::default()
            .with(gazette("doc-2", &contract_act("012", "ABC123XYZ")));
        let llm = MockProvider::new(contract_json("ABC123XYZ"));
        let mut processor = processor(source, &llm, ExtractorConfig::default());

        let report = processor.run(&ids(&["missing", "doc-2"]));

        assert_eq!(report.failed(), 1);
        assert!(matches!(report.documents[0].outcome, DocumentOutcome::Failed(_)));
        assert_eq!(report.documents[1].outcome, DocumentOutcome::Processed);

        let store = &processor.store().inner;
        assert!(!store.is_processed("missing").unwrap());
        assert!(store.is_processed("doc-2").unwrap());
    }

    #[test]
    fn test_marker_check_failure_is_treated_as_unprocessed() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", &contract_act("012", "ABC123XYZ")));
        let llm = MockProvider::new(contract_json("ABC123XYZ"));
        let mut processor = processor(source, &llm, ExtractorConfig::default());
        processor.store_mut().fail_checks = true;

        let report = processor.run(&ids(&["doc-1"]));

        assert_eq!(report.documents[0].outcome, DocumentOutcome::Processed);
        assert_eq!(report.records_saved(), 1);
    }

    #[test]
    fn test_run_all_lists_from_source() {
        let source = InMemorySource::default()
            .with(gazette("doc-1", &contract_act("001", "AAA111AAA")))
            .with(gazette("doc-2", &contract_act("002", "BBB222BBB")))
            .with(gazette("doc-3", &contract_act("003", "CCC333CCC")));
        let mut llm = MockProvider::new("not json");
        llm.add_response("AAA111AAA", contract_json("AAA111AAA"));
        llm.add_response("BBB222BBB", contract_json("BBB222BBB"));
        llm.add_response("CCC333CCC", contract_json("CCC333CCC"));
        let config = ExtractorConfig {
            page_size: 2,
            ..ExtractorConfig::default()
        };
        let mut processor = processor(source, &llm, config);

        let report = processor.run_all().unwrap();

        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.processed(), 2);
        assert_eq!(report.records_saved(), 2);
        assert!(processor.store().inner.contracts_by_code("CCC333CCC").unwrap().is_empty());
    }

    #[test]
    fn test_run_all_with_empty_source() {
        let llm = MockProvider::default();
        let mut processor = processor(InMemorySource::default(), &llm, ExtractorConfig::default());

        let report = processor.run_all().unwrap();

        assert!(report.documents.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ExtractorConfig {
            page_size: 0,
            ..ExtractorConfig::default()
        };
        let result = Processor::new(
            InMemorySource::default(),
            MockProvider::default(),
            FlakyStore::new(),
            config,
        );
        assert!(result.is_err());
    }
}
