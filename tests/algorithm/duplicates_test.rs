use kinship::algorithm::duplicates::scoring::{
    date_score, different_parents_penalty, location_score, name_score,
};
use kinship::algorithm::duplicates::{
    CancellationToken, DoubleMetaphoneEncoder, DuplicateScanner, PhoneticEncoder, ScanProgress,
    StandardisedNames, is_twins,
};
use kinship::config::DuplicateConfig;
use kinship::graph::FamilyTree;
use kinship::models::{FactDate, FactLocation, Gender, Individual, IndividualId};
use kinship::utils::test::{TreeFixture, birth_at, random_tree};
use std::sync::{Arc, Mutex};

fn id(tree: &FamilyTree, source: &str) -> IndividualId {
    tree.find_individual(source).unwrap()
}

fn scanner() -> DuplicateScanner {
    DuplicateScanner::new(DuplicateConfig::default().with_worker_threads(2)).unwrap()
}

fn person(id: &str, name: &str, gender: Gender, birth: &str, place: &str) -> Individual {
    Individual::new(id, name, gender).with_fact(birth_at(birth, place))
}

/// Two identical John Smiths plus an unrelated Mary Jones
fn twin_records() -> FamilyTree {
    TreeFixture::new()
        .born("I1", "John /Smith/", Gender::Male, "1 JAN 1850")
        .born("I2", "John /Smith/", Gender::Male, "1 JAN 1850")
        .born("I3", "Mary /Jones/", Gender::Female, "1 JAN 1850")
        .build()
        .unwrap()
}

/// Two John Smiths, each the only child of a different, fully known couple
fn different_parents() -> FamilyTree {
    TreeFixture::new()
        .born("I1", "John /Smith/", Gender::Male, "1 JAN 1850")
        .born("I2", "John /Smith/", Gender::Male, "1 JAN 1850")
        .born("I3", "George /Smith/", Gender::Male, "1820")
        .born("I4", "Ann /Brown/", Gender::Female, "1822")
        .born("I5", "Henry /Smith/", Gender::Male, "1818")
        .born("I6", "Jane /White/", Gender::Female, "1825")
        .couple("F1", "I3", "I4", &["I1"])
        .couple("F2", "I5", "I6", &["I2"])
        .build()
        .unwrap()
}

/// Delegates to Double Metaphone but panics on one place name
struct PanickingEncoder {
    inner: DoubleMetaphoneEncoder,
}

impl PhoneticEncoder for PanickingEncoder {
    fn encode(&self, name: &str) -> String {
        if name == "Panicton" {
            panic!("cannot encode {name}");
        }
        self.inner.encode(name)
    }
}

/// Delegates to Double Metaphone and cancels the scan on first use for a place
struct CancellingEncoder {
    inner: DoubleMetaphoneEncoder,
    token: CancellationToken,
}

impl PhoneticEncoder for CancellingEncoder {
    fn encode(&self, name: &str) -> String {
        if name == "England" {
            self.token.cancel();
        }
        self.inner.encode(name)
    }
}

fn scored_pairs(scanner: &DuplicateScanner) -> Vec<((IndividualId, IndividualId), i32)> {
    scanner
        .cached()
        .unwrap()
        .candidates
        .iter()
        .map(|pair| (pair.ordered_pair(), pair.score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_names_and_exact_dates() {
        let tree = twin_records();
        let a = tree.individual(id(&tree, "I1"));
        let b = tree.individual(id(&tree, "I2"));
        assert_eq!(name_score(a, b), 40);
        assert_eq!(date_score(a.birth_date(), b.birth_date()), 150);

        let scanner = scanner();
        assert_eq!(scanner.score_pair(&tree, id(&tree, "I1"), id(&tree, "I2")), 190);
    }

    #[test]
    fn test_scan_finds_identical_pair() {
        let tree = twin_records();
        let mut scanner = scanner();
        let outcome = scanner.scan(&tree, &CancellationToken::new()).unwrap();
        let report = outcome.report().unwrap();

        assert_eq!(report.candidates.len(), 1);
        let pair = report.candidates[0];
        assert_eq!(pair.ordered_pair(), (id(&tree, "I1"), id(&tree, "I2")));
        assert_eq!(pair.score, 190);
        assert!(report.failed_groups.is_empty());
        assert_eq!(report.comparisons, 1);

        let records = report.records(&tree);
        assert_eq!(records[0].name_a, "John Smith");
        assert_eq!(records[0].score, 190);
    }

    #[test]
    fn test_different_known_parents_penalty() {
        let tree = different_parents();
        let (a, b) = (id(&tree, "I1"), id(&tree, "I2"));
        assert_eq!(different_parents_penalty(&tree, a, b), -500);
        assert!(!is_twins(&tree, a, b));
        // 40 for names, 150 for dates, -500 for parents
        assert_eq!(scanner().score_pair(&tree, a, b), -310);

        let mut scanner = scanner();
        let outcome = scanner.scan(&tree, &CancellationToken::new()).unwrap();
        assert!(outcome.report().unwrap().candidates.is_empty());
    }

    #[test]
    fn test_missing_parent_is_not_a_difference() {
        let tree = TreeFixture::new()
            .born("I1", "John /Smith/", Gender::Male, "1850")
            .born("I2", "John /Smith/", Gender::Male, "1850")
            .born("I3", "George /Smith/", Gender::Male, "1820")
            .born("I5", "Henry /Smith/", Gender::Male, "1818")
            .couple("F1", "I3", "", &["I1"])
            .couple("F2", "I5", "", &["I2"])
            .build()
            .unwrap();
        let (a, b) = (id(&tree, "I1"), id(&tree, "I2"));
        assert_eq!(different_parents_penalty(&tree, a, b), 0);
        assert!(!is_twins(&tree, a, b));
    }

    #[test]
    fn test_shared_father_means_twins() {
        let tree = TreeFixture::new()
            .born("I1", "John /Smith/", Gender::Male, "1 JAN 1850")
            .born("I2", "Jon /Smith/", Gender::Male, "1 JAN 1850")
            .born("I3", "George /Smith/", Gender::Male, "1820")
            .couple("F1", "I3", "", &["I1", "I2"])
            .build()
            .unwrap();
        let (a, b) = (id(&tree, "I1"), id(&tree, "I2"));
        assert!(is_twins(&tree, a, b));
        assert_eq!(different_parents_penalty(&tree, a, b), 0);
    }

    #[test]
    fn test_location_levels() {
        let encoder = DoubleMetaphoneEncoder::new();
        let leeds = FactLocation::new("Leeds, Yorkshire, England");
        // country 5 + 10 + 75, region 5 + 10, subregion 10 + 20, and the
        // empty address and place 20 + 40 each
        assert_eq!(location_score(&encoder, &leeds, &leeds), 255);

        let scotland = FactLocation::new("Scotland");
        assert_eq!(location_score(&encoder, &scotland, &scotland), 255);

        // Sound-alike but differently cased parts miss the literal bonus
        let shouting = FactLocation::new("LEEDS, Yorkshire, England");
        assert_eq!(location_score(&encoder, &leeds, &shouting), 235);

        // Only the empty address and place agree
        let glasgow = FactLocation::new("Glasgow, Lanarkshire, Scotland");
        assert_eq!(location_score(&encoder, &leeds, &glasgow), 120 - 250);

        let blank = FactLocation::blank();
        assert_eq!(location_score(&encoder, &leeds, &blank), 0);
    }

    #[test]
    fn test_date_score_bands() {
        let exact = FactDate::new("1 JAN 1850");
        assert_eq!(date_score(&exact, &FactDate::unknown()), 0);
        assert_eq!(date_score(&FactDate::new("1850"), &FactDate::new("1850")), 50);
        assert_eq!(date_score(&exact, &FactDate::new("1 JAN 1880")), -1000);
        let ten_years = date_score(&exact, &FactDate::new("1 JAN 1860"));
        assert!(ten_years < -25 && ten_years > -1000, "got {ten_years}");
        // Exact days a week apart: exact bonus plus the closest band
        assert_eq!(date_score(&exact, &FactDate::new("8 JAN 1850")), 150);
    }

    #[test]
    fn test_standardised_forenames_make_pairs_eligible() {
        let tree = TreeFixture::new()
            .born("I1", "Bill /Smith/", Gender::Male, "1 JAN 1850")
            .born("I2", "William /Smith/", Gender::Male, "1 JAN 1850")
            .build()
            .unwrap();

        let mut plain = scanner();
        let outcome = plain.scan(&tree, &CancellationToken::new()).unwrap();
        assert!(outcome.report().unwrap().candidates.is_empty());

        let names = StandardisedNames::from_csv_str("# gender,gender,name,standard\n2,2,Bill,William\n")
            .unwrap();
        let mut standardised = scanner().with_standardiser(names);
        let outcome = standardised.scan(&tree, &CancellationToken::new()).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].score, 170);
    }

    #[test]
    fn test_opposite_genders_never_paired() {
        let tree = TreeFixture::new()
            .born("I1", "Sam /Smith/", Gender::Male, "1 JAN 1850")
            .born("I2", "Sam /Smith/", Gender::Female, "1 JAN 1850")
            .build()
            .unwrap();
        let mut scanner = scanner();
        let outcome = scanner.scan(&tree, &CancellationToken::new()).unwrap();
        assert!(outcome.report().unwrap().candidates.is_empty());
    }

    #[test]
    fn test_scores_are_symmetric() {
        let tree = random_tree(17, 120).unwrap();
        let scanner = scanner();
        let ids = tree.individual_ids().take(40).collect::<Vec<_>>();
        for a in &ids {
            for b in &ids {
                assert_eq!(
                    scanner.score_pair(&tree, *a, *b),
                    scanner.score_pair(&tree, *b, *a)
                );
            }
        }
    }

    #[test]
    fn test_results_independent_of_thread_count() {
        let tree = random_tree(23, 600).unwrap();
        let mut single =
            DuplicateScanner::new(DuplicateConfig::default().with_worker_threads(1)).unwrap();
        let mut many =
            DuplicateScanner::new(DuplicateConfig::default().with_worker_threads(4)).unwrap();
        single.scan(&tree, &CancellationToken::new()).unwrap();
        many.scan(&tree, &CancellationToken::new()).unwrap();

        let pairs = scored_pairs(&single);
        assert!(!pairs.is_empty());
        assert_eq!(pairs, scored_pairs(&many));
        assert!(pairs.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_cancelled_before_start() {
        let tree = twin_records();
        let mut scanner = scanner();
        let token = CancellationToken::new();
        token.cancel();

        let outcome = scanner.scan(&tree, &token).unwrap();
        assert!(outcome.is_cancelled());
        assert!(outcome.report().is_none());
        assert!(scanner.cached().is_none());
        assert!(scanner.duplicates().is_empty());

        let outcome = scanner.scan(&tree, &CancellationToken::new()).unwrap();
        assert!(!outcome.is_cancelled());
        assert_eq!(scanner.duplicates().len(), 1);
    }

    #[test]
    fn test_cancelled_mid_flight_returns_no_partial_list() {
        let mut fixture = TreeFixture::new();
        for index in 0..40 {
            let surname = if index % 2 == 0 { "Smith" } else { "Jones" };
            fixture = fixture.individual(person(
                &format!("I{index}"),
                &format!("John /{surname}/"),
                Gender::Male,
                "1 JAN 1850",
                "Leeds, Yorkshire, England",
            ));
        }
        let tree = fixture.build().unwrap();

        let token = CancellationToken::new();
        let encoder = CancellingEncoder {
            inner: DoubleMetaphoneEncoder::new(),
            token: token.clone(),
        };
        let mut scanner = scanner().with_encoder(encoder);
        let outcome = scanner.scan(&tree, &token).unwrap();

        assert!(outcome.is_cancelled());
        assert!(scanner.cached().is_none());
        assert!(scanner.build_duplicate_list(i32::MIN).is_empty());
    }

    #[test]
    fn test_panicking_group_is_isolated() {
        let tree = TreeFixture::new()
            .individual(person("I1", "John /Smith/", Gender::Male, "1 JAN 1850", "Panicton, England"))
            .individual(person("I2", "John /Smith/", Gender::Male, "1 JAN 1850", "Panicton, England"))
            .born("I3", "Mary /Jones/", Gender::Female, "1 JAN 1850")
            .born("I4", "Mary /Jones/", Gender::Female, "1 JAN 1850")
            .build()
            .unwrap();
        let encoder = PanickingEncoder {
            inner: DoubleMetaphoneEncoder::new(),
        };
        let smith_key = encoder.encode("Smith");
        let mut scanner = scanner().with_encoder(encoder);

        let outcome = scanner.scan(&tree, &CancellationToken::new()).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.failed_groups, vec![smith_key]);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(
            report.candidates[0].ordered_pair(),
            (id(&tree, "I3"), id(&tree, "I4"))
        );
    }

    #[test]
    fn test_cache_until_invalidated() {
        let tree = twin_records();
        let mut scanner = scanner();
        assert!(scanner.cached().is_none());
        assert_eq!(scanner.max_duplicate_score(), 0);

        scanner.scan(&tree, &CancellationToken::new()).unwrap();
        assert_eq!(scanner.max_duplicate_score(), 190);
        assert_eq!(scanner.build_duplicate_list(200).len(), 0);
        assert_eq!(scanner.build_duplicate_list(190).len(), 1);

        // A cancelled token is ignored while a cached report exists
        let cancelled = CancellationToken::new();
        cancelled.cancel();
        let outcome = scanner.scan(&tree, &cancelled).unwrap();
        assert!(!outcome.is_cancelled());

        scanner.invalidate();
        assert!(scanner.cached().is_none());
        assert!(scanner.scan(&tree, &cancelled).unwrap().is_cancelled());
    }

    #[test]
    fn test_progress_reaches_completion() {
        let tree = random_tree(29, 200).unwrap();
        let seen: Arc<Mutex<Vec<ScanProgress>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let mut scanner = scanner().with_progress_callback(move |progress| {
            sink.lock().unwrap().push(progress);
        });
        scanner.scan(&tree, &CancellationToken::new()).unwrap();

        let seen = seen.lock().unwrap();
        let last = seen.last().unwrap();
        assert_eq!(last.percent, 100);
        assert_eq!(last.completed, last.total);
        assert!(seen.windows(2).all(|w| w[0].completed <= w[1].completed));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(DuplicateScanner::new(DuplicateConfig::default().with_worker_threads(0)).is_err());
    }
}
