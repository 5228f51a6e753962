use kinship::graph::{ChildRecord, FamilyRecord, FamilyTreeBuilder};
use kinship::models::{Fact, FactType, Gender, Individual};
use kinship::utils::test::{TreeFixture, sample_tree};
use kinship::KinshipError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_links_both_directions() {
        let tree = sample_tree().unwrap();
        let john = tree.find_individual("I1").unwrap();
        let william = tree.find_individual("I2").unwrap();
        let mary = tree.find_individual("I3").unwrap();

        assert_eq!(tree.natural_father(john), Some(william));
        assert_eq!(tree.natural_mother(john), Some(mary));

        let family = tree.find_family("F1").unwrap();
        assert_eq!(tree.family(family).children(), &[john]);
        assert!(tree.individual(william).families_as_spouse().contains(&family));
        assert_eq!(tree.family(family).spouse_of(william), Some(mary));
    }

    #[test]
    fn test_step_child_has_no_natural_mother() {
        let tree = sample_tree().unwrap();
        let peter = tree.find_individual("I14").unwrap();
        let robert = tree.find_individual("I13").unwrap();
        assert_eq!(tree.natural_father(peter), Some(robert));
        assert_eq!(tree.natural_mother(peter), None);
    }

    #[test]
    fn test_lone_individual_gets_solo_family() {
        let tree = sample_tree().unwrap();
        let zachary = tree.find_individual("I15").unwrap();
        let families = tree.individual(zachary).families_as_spouse();
        assert_eq!(families.len(), 1);
        let solo = tree.family(families[0]);
        assert!(solo.is_solo());
        assert_eq!(solo.husband(), Some(zachary));
        assert!(solo.children().is_empty());
    }

    #[test]
    fn test_every_individual_has_a_family() {
        let tree = sample_tree().unwrap();
        for (_, individual) in tree.individuals() {
            assert!(
                !individual.families_as_spouse().is_empty()
                    || !individual.parental_relationships().is_empty(),
                "{} has no family",
                individual.id()
            );
        }
    }

    #[test]
    fn test_duplicate_individual_rejected() {
        let result = TreeFixture::new()
            .person("I1", "John /Smith/", Gender::Male)
            .person("I1", "Jon /Smith/", Gender::Male)
            .build();
        assert!(matches!(
            result,
            Err(KinshipError::DuplicateId { kind: "individual", .. })
        ));
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let result = TreeFixture::new()
            .person("I1", "John /Smith/", Gender::Male)
            .couple("F1", "I1", "I2", &[])
            .build();
        match result {
            Err(KinshipError::DanglingReference { family, individual }) => {
                assert_eq!(family, "F1");
                assert_eq!(individual, "I2");
            }
            other => panic!("expected dangling reference, got {other:?}"),
        }
    }

    #[test]
    fn test_parentage_flags_need_a_parent() {
        let mut builder = FamilyTreeBuilder::new();
        builder
            .add_individual(Individual::new("I1", "Ann /Lee/", Gender::Female))
            .add_individual(Individual::new("I2", "Tom /Lee/", Gender::Male))
            .add_family(
                FamilyRecord::new("F1")
                    .with_wife("I1")
                    .with_child_record(ChildRecord::natural("I2")),
            );
        let tree = builder.build().unwrap();
        let tom = tree.find_individual("I2").unwrap();
        let relationship = tree.individual(tom).parental_relationships()[0];
        assert!(!relationship.natural_father);
        assert!(relationship.natural_mother);
    }

    #[test]
    fn test_all_facts_includes_family_facts() {
        let tree = sample_tree().unwrap();
        let john = tree.find_individual("I1").unwrap();
        let facts = tree.all_facts(john);
        assert!(facts.iter().any(|f| f.fact_type == FactType::Birth));
        let marriage = facts
            .iter()
            .find(|f| f.fact_type == FactType::Marriage)
            .unwrap();
        assert_eq!(marriage.family_id(), Some("F4"));
    }

    #[test]
    fn test_fix_ids_pads_to_population_width() {
        let mut tree = sample_tree().unwrap();
        tree.fix_ids();
        assert!(tree.find_individual("I1").is_none());
        let john = tree.find_individual("I01").unwrap();
        assert_eq!(tree.individual(john).name(), "John Smith");
        assert!(tree.find_individual("I15").is_some());
    }

    #[test]
    fn test_fix_ids_keeps_colliding_ids_apart() {
        let mut fixture = TreeFixture::new()
            .born("I1", "John /Smith/", Gender::Male, "1850")
            .born("I01", "James /Smith/", Gender::Male, "1852");
        for n in 2..=10 {
            fixture = fixture.born(&format!("I{n}"), "Ann /Brown/", Gender::Female, "1860");
        }
        let mut tree = fixture.build().unwrap();
        tree.fix_ids();

        assert_eq!(tree.len(), 11);
        let john = tree.find_individual("I1").unwrap();
        let james = tree.find_individual("I01").unwrap();
        assert_ne!(john, james);
        assert_eq!(tree.individual(john).name(), "John Smith");
        assert_eq!(tree.individual(james).name(), "James Smith");
        assert!(tree.find_individual("I02").is_some());
        assert!(tree.find_individual("I10").is_some());
    }

    #[test]
    fn test_fix_ids_leaves_non_numeric_ids() {
        let mut tree = TreeFixture::new()
            .individual(
                Individual::new("ABC", "John /Smith/", Gender::Male)
                    .with_fact(Fact::new(FactType::Birth, "1850")),
            )
            .build()
            .unwrap();
        tree.fix_ids();
        assert!(tree.find_individual("ABC").is_some());
    }
}
