use chrono::NaiveDate;
use kinship::algorithm::quality::{DataQualityChecker, DataQualityReport};
use kinship::config::DataQualityConfig;
use kinship::graph::{FamilyRecord, FamilyTree};
use kinship::models::{
    DataErrorCategory, ErrorEntity, Fact, FactErrorLevel, FactLocation, FactType, Gender,
    Individual, MaritalStatus, Severity,
};
use kinship::utils::test::{TreeFixture, sample_tree};

fn check(tree: &FamilyTree) -> DataQualityReport {
    let today = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
    DataQualityChecker::new(DataQualityConfig::default().with_today(today)).report(tree)
}

/// (entity id, message) pairs reported under one category
fn findings(report: &DataQualityReport, category: DataErrorCategory) -> Vec<(String, String)> {
    report
        .group(category)
        .map(|group| {
            group
                .errors
                .iter()
                .map(|e| (e.entity_id.clone(), e.message.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn life(id: &str, name: &str, gender: Gender, birth: &str, death: &str) -> Individual {
    Individual::new(id, name, gender)
        .with_fact(Fact::new(FactType::Birth, birth))
        .with_fact(Fact::new(FactType::Death, death))
}

fn married(id: &str, husband: &str, wife: &str, date: &str, children: &[&str]) -> FamilyRecord {
    let mut record = FamilyRecord::new(id)
        .with_husband(husband)
        .with_wife(wife)
        .with_marital_status(MaritalStatus::Married)
        .with_fact(Fact::new(FactType::Marriage, date));
    for child in children {
        record = record.with_child(child);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_death_before_birth() {
        let tree = TreeFixture::new()
            .individual(life("I1", "John /Smith/", Gender::Male, "1 JAN 1900", "1850"))
            .build()
            .unwrap();
        let report = check(&tree);
        assert_eq!(
            findings(&report, DataErrorCategory::BirthAfterDeath),
            vec![("I1".to_string(), "Died 1850 before born".to_string())]
        );
        let error = &report.group(DataErrorCategory::BirthAfterDeath).unwrap().errors[0];
        assert_eq!(error.severity, Severity::Error);
    }

    #[test]
    fn test_loose_facts_around_birth_and_death() {
        let tree = TreeFixture::new()
            .individual(
                Individual::new("I1", "John /Smith/", Gender::Male)
                    .with_fact(Fact::new(FactType::Birth, "1 JUN 1850"))
                    .with_fact(Fact::new(FactType::Baptism, "1 APR 1850")),
            )
            .individual(
                Individual::new("I2", "Jane /Smith/", Gender::Female)
                    .with_fact(Fact::new(FactType::Birth, "1 JUN 1850"))
                    .with_fact(Fact::new(FactType::Baptism, "1 DEC 1849")),
            )
            .individual(
                life("I3", "Mary /Jones/", Gender::Female, "1840", "1900")
                    .with_fact(Fact::new(FactType::Residence, "1905")),
            )
            .build()
            .unwrap();
        let report = check(&tree);

        // Baptism two months early is inside the grace period, six is not
        assert_eq!(
            findings(&report, DataErrorCategory::FactsBeforeBirth),
            vec![(
                "I2".to_string(),
                "Baptism fact dated 1 DEC 1849 before born 1 JUN 1850".to_string()
            )]
        );
        assert_eq!(
            findings(&report, DataErrorCategory::FactsAfterDeath),
            vec![(
                "I3".to_string(),
                "Residence fact dated 1905 after died 1900".to_string()
            )]
        );
    }

    #[test]
    fn test_loader_fact_errors_keep_their_severity() {
        let tree = TreeFixture::new()
            .individual(
                Individual::new("I1", "John /Smith/", Gender::Male).with_fact(
                    Fact::new(FactType::Residence, "1880")
                        .with_error(FactErrorLevel::WarningAllow, "bad date"),
                ),
            )
            .individual(
                Individual::new("I2", "Jane /Smith/", Gender::Female).with_fact(
                    Fact::new(FactType::Residence, "1880")
                        .with_error(FactErrorLevel::Error, "no such place"),
                ),
            )
            .individual(
                Individual::new("I3", "Mary /Jones/", Gender::Female).with_fact(
                    Fact::new(FactType::Residence, "1880")
                        .with_error(FactErrorLevel::Ignore, "ignored"),
                ),
            )
            .build()
            .unwrap();
        let report = check(&tree);

        let group = report.group(DataErrorCategory::FactError).unwrap();
        let found = group
            .errors
            .iter()
            .map(|e| (e.entity_id.as_str(), e.severity, e.message.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&("I1", Severity::Warning, "Residence fact error: bad date")));
        assert!(found.contains(&("I2", Severity::Error, "Residence fact error: no such place")));
    }

    #[test]
    fn test_burial_before_death() {
        let tree = TreeFixture::new()
            .individual(
                life("I1", "John /Smith/", Gender::Male, "1850", "10 MAR 1900")
                    .with_fact(Fact::new(FactType::Burial, "1 MAR 1900")),
            )
            .individual(
                life("I2", "Jane /Smith/", Gender::Female, "1850", "10 MAR 1900")
                    .with_fact(Fact::new(FactType::Burial, "1900")),
            )
            .build()
            .unwrap();
        let report = check(&tree);
        // A burial year overlapping the death is not reported
        assert_eq!(
            findings(&report, DataErrorCategory::BurialBeforeDeath),
            vec![(
                "I1".to_string(),
                "Buried 1 MAR 1900 before died 10 MAR 1900".to_string()
            )]
        );
    }

    #[test]
    fn test_aged_more_than_110() {
        let tree = TreeFixture::new()
            .individual(life("I1", "Old /Tom/", Gender::Male, "1 JAN 1700", "1 JAN 1820"))
            .individual(life("I2", "Young /Tom/", Gender::Male, "1 JAN 1700", "1 JAN 1800"))
            .build()
            .unwrap();
        let report = check(&tree);
        let found = findings(&report, DataErrorCategory::AgedMoreThan110);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "I1");
        assert_eq!(found[0].1, "Aged over 110 before died 1 JAN 1820");
    }

    #[test]
    fn test_living_with_death_date() {
        let tree = TreeFixture::new()
            .individual(life("I1", "Ann /Lee/", Gender::Female, "1850", "1920").living())
            .build()
            .unwrap();
        let report = check(&tree);
        let found = findings(&report, DataErrorCategory::LivingWithDeathDate);
        assert_eq!(found.len(), 1);
        assert!(found[0].1.contains("1920"));
    }

    #[test]
    fn test_parent_age_limits() {
        let tree = TreeFixture::new()
            .born("I1", "Child /Lee/", Gender::Male, "1 JAN 1800")
            .born("I2", "Father /Lee/", Gender::Male, "1700")
            .born("I3", "Mother /Lee/", Gender::Female, "1 JAN 1790")
            .couple("F1", "I2", "I3", &["I1"])
            .build()
            .unwrap();
        let report = check(&tree);

        let old = findings(&report, DataErrorCategory::BirthAfterFatherAged90);
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].0, "I1");
        assert_eq!(
            old[0].1,
            "Father Father Lee born 1700 is more than 90 yrs old when individual was born"
        );

        let young = findings(&report, DataErrorCategory::BirthBeforeMotherAged13);
        assert_eq!(young.len(), 1);
        assert!(young[0].1.contains("less than 13 yrs old"));
        assert!(findings(&report, DataErrorCategory::BirthAfterMotherAged60).is_empty());
        assert!(findings(&report, DataErrorCategory::BirthBeforeFatherAged13).is_empty());
    }

    #[test]
    fn test_mother_died_before_birth() {
        let tree = TreeFixture::new()
            .born("I1", "Child /Lee/", Gender::Male, "1 JAN 1800")
            .born("I2", "Father /Lee/", Gender::Male, "1770")
            .individual(life("I3", "Ann /Lee/", Gender::Female, "1772", "1 JAN 1799"))
            .couple("F1", "I2", "I3", &["I1"])
            .build()
            .unwrap();
        let report = check(&tree);
        assert_eq!(
            findings(&report, DataErrorCategory::BirthAfterMotherDeath),
            vec![(
                "I1".to_string(),
                "Mother Ann Lee died 1 JAN 1799 which is before individual was born".to_string()
            )]
        );
    }

    #[test]
    fn test_father_death_grace_period() {
        let tree = TreeFixture::new()
            .born("I1", "Posthumous /Lee/", Gender::Male, "1 JUN 1850")
            .born("I2", "Late /Lee/", Gender::Male, "1 DEC 1850")
            .individual(life("I3", "Father /Lee/", Gender::Male, "1820", "1 JAN 1850"))
            .born("I4", "Mother /Lee/", Gender::Female, "1822")
            .couple("F1", "I3", "I4", &["I1", "I2"])
            .build()
            .unwrap();
        let report = check(&tree);
        let found = findings(&report, DataErrorCategory::BirthAfterFatherDeath);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "I2");
        assert!(found[0].1.contains("more than 9 months before"));
    }

    #[test]
    fn test_marriage_after_death() {
        let tree = TreeFixture::new()
            .individual(life("I1", "John /Smith/", Gender::Male, "1850", "1900"))
            .born("I2", "Mary /Jones/", Gender::Female, "1855")
            .family(married("F1", "I1", "I2", "1905", &[]))
            .build()
            .unwrap();
        let report = check(&tree);
        assert_eq!(
            findings(&report, DataErrorCategory::MarriageAfterDeath),
            vec![(
                "I1".to_string(),
                "Marriage to Mary Jones in 1905 is after individual died 1900".to_string()
            )]
        );
        let spouse_dead = findings(&report, DataErrorCategory::MarriageAfterSpouseDead);
        assert_eq!(spouse_dead.len(), 1);
        assert_eq!(spouse_dead[0].0, "I2");
    }

    #[test]
    fn test_marriage_before_13() {
        let tree = TreeFixture::new()
            .born("I1", "John /Smith/", Gender::Male, "1880")
            .born("I2", "Mary /Jones/", Gender::Female, "1 JAN 1900")
            .family(married("F1", "I1", "I2", "1 JAN 1910", &[]))
            .build()
            .unwrap();
        let report = check(&tree);
        let own = findings(&report, DataErrorCategory::MarriageBefore13);
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].0, "I2");
        assert!(own[0].1.contains("before individual was 13 years old"));

        let spouse = findings(&report, DataErrorCategory::MarriageBeforeSpouse13);
        assert_eq!(spouse.len(), 1);
        assert_eq!(spouse[0].0, "I1");
        assert!(spouse[0].1.contains("spouse born 1 JAN 1900"));
    }

    #[test]
    fn test_fact_after_today() {
        let tree = TreeFixture::new()
            .individual(
                Individual::new("I1", "John /Smith/", Gender::Male)
                    .with_fact(Fact::new(FactType::Birth, "1990"))
                    .with_fact(Fact::new(FactType::Residence, "2030")),
            )
            .born("I2", "Mary /Jones/", Gender::Female, "1992")
            .family(married("F1", "I1", "I2", "2031", &[]))
            .build()
            .unwrap();
        let report = check(&tree);
        let group = report.group(DataErrorCategory::FactAfterToday).unwrap();
        let individual = group
            .errors
            .iter()
            .find(|e| matches!(e.entity, ErrorEntity::Individual(_)))
            .unwrap();
        assert_eq!(individual.message, "Residence fact dated 2030 is after today");
        let family = group
            .errors
            .iter()
            .find(|e| matches!(e.entity, ErrorEntity::Family(_)))
            .unwrap();
        assert_eq!(family.entity_id, "F1");
        assert_eq!(family.severity, Severity::Error);
    }

    #[test]
    fn test_duplicate_facts() {
        let tree = TreeFixture::new()
            .individual(
                Individual::new("I1", "John /Smith/", Gender::Male)
                    .with_fact(Fact::new(FactType::Birth, "1850"))
                    .with_fact(
                        Fact::new(FactType::Residence, "1881").with_location(FactLocation::new("Leeds")),
                    )
                    .with_fact(
                        Fact::new(FactType::Residence, "1881").with_location(FactLocation::new("Leeds")),
                    )
                    .with_fact(
                        Fact::new(FactType::Census, "1891").with_location(FactLocation::new("Leeds")),
                    )
                    .with_fact(
                        Fact::new(FactType::Census, "1891").with_location(FactLocation::new("York")),
                    ),
            )
            .build()
            .unwrap();
        let report = check(&tree);
        assert_eq!(
            findings(&report, DataErrorCategory::DuplicateFact),
            vec![("I1".to_string(), "Duplicated Residence fact recorded".to_string())]
        );
        assert_eq!(
            findings(&report, DataErrorCategory::PossibleDuplicateFact),
            vec![("I1".to_string(), "Possibly duplicated Census fact recorded".to_string())]
        );
    }

    #[test]
    fn test_spouse_gender_mismatch() {
        let tree = TreeFixture::new()
            .person("I1", "Ann /Lee/", Gender::Female)
            .person("I2", "Tom /Lee/", Gender::Male)
            .family(FamilyRecord::new("F1").with_husband("I1").with_wife("I2"))
            .build()
            .unwrap();
        let report = check(&tree);
        let found = findings(&report, DataErrorCategory::MaleWifeFemaleHusband);
        assert_eq!(
            found,
            vec![
                ("F1".to_string(), "Husband Ann Lee is female".to_string()),
                ("F1".to_string(), "Wife Tom Lee is male".to_string()),
            ]
        );
    }

    #[test]
    fn test_same_surname_couple() {
        let tree = TreeFixture::new()
            .born("I1", "John /Smith/", Gender::Male, "1850")
            .born("I2", "Mary /Smith/", Gender::Female, "1852")
            .couple("F1", "I1", "I2", &[])
            .build()
            .unwrap();
        let report = check(&tree);
        let found = findings(&report, DataErrorCategory::SameSurnameCouple);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "I1");
        assert!(found[0].1.starts_with("Spouse Mary Smith has same surname."));
        let error = &report.group(DataErrorCategory::SameSurnameCouple).unwrap().errors[0];
        assert_eq!(error.severity, Severity::Questionable);
    }

    #[test]
    fn test_same_surname_as_maiden_name() {
        let tree = TreeFixture::new()
            .born("I1", "John /Smith/", Gender::Male, "1850")
            .born("I2", "Mary /Smith/", Gender::Female, "1852")
            .born("I3", "George /Smith/", Gender::Male, "1820")
            .couple("F1", "I1", "I2", &[])
            .couple("F2", "I3", "", &["I2"])
            .build()
            .unwrap();
        let report = check(&tree);
        assert!(findings(&report, DataErrorCategory::SameSurnameCouple).is_empty());
    }

    #[test]
    fn test_sibling_spacing() {
        let tree = TreeFixture::new()
            .born("I1", "Mother /Lee/", Gender::Female, "1825")
            .born("I2", "Father /Lee/", Gender::Male, "1822")
            .born("I3", "Amy /Lee/", Gender::Female, "1 JAN 1850")
            .born("I4", "Twin /Lee/", Gender::Female, "3 JAN 1850")
            .born("I5", "Bob /Lee/", Gender::Male, "1 MAR 1850")
            .born("I6", "Cat /Lee/", Gender::Female, "1 DEC 1850")
            .born("I7", "Dan /Lee/", Gender::Male, "ABT 1851")
            .couple("F1", "I2", "I1", &["I6", "I3", "I5", "I4", "I7"])
            .build()
            .unwrap();
        let report = check(&tree);

        assert_eq!(
            findings(&report, DataErrorCategory::SiblingsTooClose),
            vec![(
                "I5".to_string(),
                "Born 1 MAR 1850, only 57 days after sibling Twin Lee born 3 JAN 1850".to_string()
            )]
        );
        let questionable = findings(&report, DataErrorCategory::SiblingsQuestionablySpaced);
        assert_eq!(questionable.len(), 1);
        assert_eq!(questionable[0].0, "I6");
        assert!(questionable[0].1.contains("only 275 days after sibling Bob Lee"));
    }

    #[test]
    fn test_report_totals() {
        let tree = TreeFixture::new()
            .individual(life("I1", "John /Smith/", Gender::Male, "1 JAN 1900", "1850"))
            .born("I2", "Mary /Smith/", Gender::Female, "1902")
            .couple("F1", "I1", "I2", &[])
            .build()
            .unwrap();
        let report = check(&tree);

        assert_eq!(report.groups.len(), DataErrorCategory::ALL.len());
        assert_eq!(report.total, report.groups.iter().map(|g| g.len()).sum::<usize>());
        assert_eq!(report.total, report.errors + report.warnings + report.questionable);
        assert!(report.errors >= 1);
        assert!(report.questionable >= 1);
        assert!(report.non_empty().all(|g| !g.is_empty()));

        let codes: Vec<u8> = report.groups.iter().map(|g| g.category.code()).collect();
        assert!(codes.windows(2).all(|w| w[0] < w[1]));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"total\""));
        assert!(json.contains("Died 1850 before born"));
        assert!(report.to_string().starts_with("Data quality: "));
    }

    #[test]
    fn test_sample_tree_is_consistent() {
        let tree = sample_tree().unwrap();
        let report = check(&tree);
        for category in [
            DataErrorCategory::BirthAfterDeath,
            DataErrorCategory::MaleWifeFemaleHusband,
            DataErrorCategory::FactAfterToday,
            DataErrorCategory::SiblingsTooClose,
        ] {
            assert!(findings(&report, category).is_empty(), "{category}");
        }
    }
}
