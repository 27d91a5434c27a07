//! tests/ledger_tests.rs - Ledger bootstrap, ingest, search, delete and stats

#[cfg(test)]
mod tests {
    use crate::{
        ledger::{
            generator::{generate_corpus, HISTORY_WINDOW_SECS},
            snapshot, BootstrapOptions, Ledger, LedgerError, SearchQuery, SEARCH_LIMIT,
        },
        models::{classify, IndexSource, RiskLevel, Transaction, KNOWN_BANKS},
        validation::ValidationError,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    /// Build a record directly, with derived fields from the ingest policy.
    fn record(id: &str, description: &str, bank: &str, amount: f64, is_fraud: u8, timestamp: f64) -> Transaction {
        let (risk_level, index_source) = classify(is_fraud, amount);
        Transaction {
            id: id.to_string(),
            description: description.to_string(),
            amount,
            bank: bank.to_string(),
            user_id: "Alice".to_string(),
            is_fraud,
            timestamp,
            risk_level,
            index_source,
        }
    }

    fn seeded_ledger(seed: u64) -> Ledger {
        let mut rng = StdRng::seed_from_u64(seed);
        Ledger::initialize(&BootstrapOptions::default(), &mut rng).expect("bootstrap failed")
    }

    fn snapshot_options(dir: &TempDir) -> BootstrapOptions {
        BootstrapOptions {
            snapshot_path: Some(dir.path().join("demo_data.json")),
            ..BootstrapOptions::default()
        }
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let options = snapshot_options(&dir);
        let path = options.snapshot_path.clone().unwrap();

        let first = Ledger::initialize(&options, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(path.exists(), "generation should write the snapshot");
        let written = fs::read(&path).unwrap();

        // A different seed proves the second call loads rather than regenerates.
        let second = Ledger::initialize(&options, &mut StdRng::seed_from_u64(99)).unwrap();

        assert_eq!(first.records(), second.records());
        assert_eq!(fs::read(&path).unwrap(), written, "loading must not rewrite the snapshot");
    }

    #[test]
    fn test_malformed_snapshot_aborts_bootstrap() {
        let dir = TempDir::new().unwrap();
        let options = snapshot_options(&dir);
        let path = options.snapshot_path.clone().unwrap();
        fs::write(&path, "{ not a list").unwrap();

        let result = Ledger::initialize(&options, &mut StdRng::seed_from_u64(1));

        assert!(matches!(result, Err(LedgerError::Bootstrap { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not a list");
    }

    #[test]
    fn test_snapshot_with_wrong_record_shape_is_rejected() {
        let dir = TempDir::new().unwrap();
        let options = snapshot_options(&dir);
        fs::write(options.snapshot_path.as_ref().unwrap(), r#"[{"id": "x"}]"#).unwrap();

        let result = Ledger::initialize(&options, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(LedgerError::Bootstrap { .. })));
    }

    #[test]
    fn test_snapshot_fills_missing_optional_fields() {
        let dir = TempDir::new().unwrap();
        let options = snapshot_options(&dir);
        let raw = r#"[{
            "id": "demo_0",
            "description": "Coffee at Starbucks",
            "amount": 4.5,
            "bank": "Bank B",
            "is_fraud": 0,
            "timestamp": 1700000000.25,
            "risk_level": "✅ LOW RISK (Verified Pattern)"
        }]"#;
        fs::write(options.snapshot_path.as_ref().unwrap(), raw).unwrap();

        let ledger = Ledger::initialize(&options, &mut StdRng::seed_from_u64(1)).unwrap();
        let loaded = &ledger.records()[0];

        assert_eq!(ledger.len(), 1);
        assert_eq!(loaded.user_id, "system");
        assert_eq!(loaded.index_source, IndexSource::SecureHistory);
        assert_eq!(loaded.risk_level, RiskLevel::LowRisk);
    }

    #[test]
    fn test_snapshot_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("seed.json");
        let records = vec![record("a", "Rent payment", "Bank A", 1500.0, 0, 10.0)];

        snapshot::save(&path, &records).unwrap();

        assert_eq!(snapshot::load(&path).unwrap(), records);
    }

    #[test]
    fn test_generated_corpus_shape() {
        let ledger = seeded_ledger(5);
        let records = ledger.records();

        assert_eq!(records.len(), 200);
        assert_eq!(records.iter().filter(|t| t.is_fraud == 1).count(), 30);

        let ids: HashSet<_> = records.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), records.len(), "generated ids must be unique");

        for t in records {
            assert!(KNOWN_BANKS.contains(&t.bank.as_str()));
            if t.is_threat() {
                assert!(t.id.starts_with("demo_threat_"));
                assert_eq!(t.user_id, "system");
                assert_eq!(t.risk_level, RiskLevel::Blocked);
                assert_eq!(t.index_source, IndexSource::KnownThreats);
            } else {
                assert!(t.id.starts_with("demo_"));
                assert_eq!(t.index_source, IndexSource::SecureHistory);
                assert_ne!(t.risk_level, RiskLevel::Blocked);
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible_with_seed() {
        let now = 1_700_000_000.0;
        let a = generate_corpus(&mut StdRng::seed_from_u64(3), 20, 5, now);
        let b = generate_corpus(&mut StdRng::seed_from_u64(3), 20, 5, now);

        assert_eq!(a, b);
        assert!(a
            .iter()
            .all(|t| t.timestamp <= now && t.timestamp >= now - f64::from(HISTORY_WINDOW_SECS)));
    }

    #[test]
    fn test_configurable_corpus_size() {
        let options = BootstrapOptions {
            snapshot_path: None,
            legitimate_count: 7,
            fraud_count: 2,
        };
        let ledger = Ledger::initialize(&options, &mut StdRng::seed_from_u64(8)).unwrap();
        let stats = ledger.stats();

        assert_eq!(stats.total, 9);
        assert_eq!(stats.threats, 2);
    }

    #[test]
    fn test_add_derives_risk_fields() {
        let mut ledger = Ledger::new();

        ledger.add("Stolen card purchase", 2500.0, "Bank A", "system", 1).unwrap();
        ledger.add("Card verification attempt", 0.5, "Bank A", "system", 1).unwrap();
        ledger.add("Coffee", 4.99, "Bank B", "Bob", 0).unwrap();
        ledger.add("Gym membership", 5.0, "Bank C", "Charlie", 0).unwrap();

        let records = ledger.records();
        // Most recent first.
        assert_eq!(records[0].description, "Gym membership");
        assert_eq!(records[0].risk_level, RiskLevel::LowRisk);
        assert_eq!(records[1].risk_level, RiskLevel::MediumRisk);
        assert_eq!(records[2].risk_level, RiskLevel::Blocked);
        assert_eq!(records[3].risk_level, RiskLevel::Blocked);

        for t in records {
            let threat = t.is_fraud == 1;
            assert_eq!(threat, t.index_source == IndexSource::KnownThreats);
            assert_eq!(threat, t.risk_level == RiskLevel::Blocked);
        }
        assert_eq!(ledger.ingested_count(), 4);
    }

    #[test]
    fn test_add_assigns_timestamp_id_and_wall_clock_time() {
        let mut ledger = Ledger::new();
        let before = chrono::Utc::now().timestamp() as f64;

        let id = ledger.add("Rent payment", 1500.0, "Bank A", "Alice", 0).unwrap();

        let stored = &ledger.records()[0];
        assert_eq!(stored.id, id);
        assert!(id.starts_with("user_"));
        assert!(id["user_".len()..].parse::<i64>().is_ok());
        assert!(stored.timestamp >= before);
    }

    #[test]
    fn test_add_rejects_invalid_input_without_side_effects() {
        let mut ledger = Ledger::new();

        let negative = ledger.add("Refund", -1.0, "Bank A", "Alice", 0);
        assert!(matches!(
            negative,
            Err(LedgerError::Validation(ValidationError::InvalidAmount(_)))
        ));

        let nan = ledger.add("Refund", f64::NAN, "Bank A", "Alice", 0);
        assert!(matches!(nan, Err(LedgerError::Validation(_))));

        let flag = ledger.add("Refund", 3.0, "Bank A", "Alice", 2);
        assert!(matches!(
            flag,
            Err(LedgerError::Validation(ValidationError::InvalidFraudFlag(2)))
        ));

        let blank = ledger.add("   ", 3.0, "Bank A", "Alice", 0);
        assert!(matches!(
            blank,
            Err(LedgerError::Validation(ValidationError::MissingParameter(_)))
        ));

        let blank_bank = ledger.add("Coffee", 3.0, "", "Alice", 0);
        assert!(matches!(
            blank_bank,
            Err(LedgerError::Validation(ValidationError::MissingParameter(ref p))) if p == "bank"
        ));

        let blank_user = ledger.add("Coffee", 3.0, "Bank A", " ", 0);
        assert!(matches!(
            blank_user,
            Err(LedgerError::Validation(ValidationError::MissingParameter(ref p))) if p == "user_id"
        ));

        assert!(ledger.is_empty());
        assert_eq!(ledger.ingested_count(), 0);
    }

    #[test]
    fn test_search_is_capped_and_sorted() {
        let ledger = seeded_ledger(11);

        let hits = ledger.search(&SearchQuery::default());

        assert_eq!(hits.len(), SEARCH_LIMIT);
        assert!(hits
            .windows(2)
            .all(|w| w[0].metadata.timestamp >= w[1].metadata.timestamp));
        assert!(hits.iter().all(|h| h.score == 0.5));
    }

    #[test]
    fn test_search_ties_keep_ledger_order() {
        let ledger = Ledger::from_records(vec![
            record("first", "Movie tickets", "Bank A", 28.0, 0, 100.0),
            record("second", "Movie tickets", "Bank A", 28.0, 0, 100.0),
            record("newest", "Movie tickets", "Bank A", 28.0, 0, 200.0),
        ]);

        let ids: Vec<_> = ledger
            .search(&SearchQuery::default())
            .into_iter()
            .map(|h| h.id)
            .collect();

        assert_eq!(ids, vec!["newest", "first", "second"]);
    }

    #[test]
    fn test_search_filters() {
        let ledger = Ledger::from_records(vec![
            record("a", "Online shopping AMAZON", "Bank A", 156.78, 0, 1.0),
            record("b", "Rent payment", "Bank B", 1500.0, 0, 2.0),
            record("c", "Spotify premium", "Bank C", 9.99, 0, 3.0),
            record("d", "Amazon gift card", "Bank C", 25.0, 0, 4.0),
        ]);

        let text: Vec<_> = ledger
            .search(&SearchQuery::text("amazon"))
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(text, vec!["d", "a"]);

        let by_bank = ledger.search(&SearchQuery::default().in_bank("Bank C"));
        assert!(by_bank.iter().all(|h| h.metadata.bank == "Bank C"));
        assert_eq!(by_bank.len(), 2);

        let by_amount = ledger.search(&SearchQuery::default().min_amount(156.78));
        let ids: Vec<_> = by_amount.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        assert!(ledger.search(&SearchQuery::text("bitcoin")).is_empty());
    }

    #[test]
    fn test_non_admin_is_pinned_to_own_bank() {
        let ledger = seeded_ledger(21);

        let hits = ledger.search(&SearchQuery::default().as_user("Alice").in_bank("Bank C"));

        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.metadata.bank == "Bank A"));
        assert!(hits.iter().all(|h| h.index_source != IndexSource::KnownThreats));
    }

    #[test]
    fn test_unrecognised_non_admin_keeps_filter_but_loses_threats() {
        let ledger = Ledger::from_records(vec![
            record("legit", "Card reader", "Bank B", 10.0, 0, 1.0),
            record("threat", "Card testing", "Bank B", 1.0, 1, 2.0),
            record("other", "Card reader", "Bank A", 10.0, 0, 3.0),
        ]);

        let hits = ledger.search(&SearchQuery::text("card").as_user("auditor").in_bank("Bank B"));

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "legit");
    }

    #[test]
    fn test_admin_honours_requested_bank() {
        let ledger = seeded_ledger(21);

        let hits = ledger.search(&SearchQuery::default().in_bank("Bank B"));

        assert!(hits.iter().all(|h| h.metadata.bank == "Bank B"));
    }

    #[test]
    fn test_delete_then_search() {
        let mut ledger = seeded_ledger(2);
        let id = ledger.add("Suspicious ATM withdrawal", 3000.0, "Bank C", "admin", 0).unwrap();
        assert!(ledger.search(&SearchQuery::default()).iter().any(|h| h.id == id));

        assert!(ledger.delete(&id));

        assert!(ledger.search(&SearchQuery::default()).iter().all(|h| h.id != id));
        assert!(ledger.records().iter().all(|t| t.id != id));
    }

    #[test]
    fn test_delete_unknown_id_reports_success() {
        let mut ledger = seeded_ledger(2);
        let before = ledger.len();

        assert!(ledger.delete("no_such_id"));
        assert_eq!(ledger.len(), before);
    }

    #[test]
    fn test_delete_removes_every_duplicate() {
        let mut ledger = Ledger::from_records(vec![
            record("dup", "Pet store supplies", "Bank A", 56.8, 0, 1.0),
            record("keep", "Pet store supplies", "Bank A", 56.8, 0, 2.0),
            record("dup", "Pet store supplies", "Bank A", 56.8, 0, 3.0),
        ]);

        ledger.delete("dup");

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].id, "keep");
    }

    #[test]
    fn test_stats_totals() {
        let ledger = seeded_ledger(4);
        let stats = ledger.stats();

        assert_eq!(stats.total, stats.threats + stats.legitimate);
        assert_eq!(stats.by_bank.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_bank.len(), KNOWN_BANKS.len());
    }

    #[test]
    fn test_stats_ignore_unknown_banks_in_breakdown() {
        let mut ledger = seeded_ledger(4);
        ledger.add("Wire transfer", 700.0, "Bank Z", "admin", 0).unwrap();

        let stats = ledger.stats();

        assert_eq!(stats.total, 201);
        assert_eq!(stats.by_bank.values().sum::<usize>(), 200);
        assert!(!stats.by_bank.contains_key("Bank Z"));
    }

    #[test]
    fn test_card_testing_scenario() {
        let mut ledger = seeded_ledger(9);
        let id = ledger
            .add("Unauthorized card testing", 1.00, "Bank A", "system", 1)
            .unwrap();

        let admin = ledger.search(&SearchQuery::text("card").as_user("admin"));
        let hit = admin.iter().find(|h| h.id == id).expect("admin should see the threat");
        assert_eq!(hit.risk_level, RiskLevel::Blocked);
        assert_eq!(hit.index_source, IndexSource::KnownThreats);

        let bob = ledger.search(&SearchQuery::text("card").as_user("Bob"));
        assert!(bob.iter().all(|h| h.id != id));
    }
}
