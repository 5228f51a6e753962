use kinship::models::{Fact, FactDate, FactType, Gender, Individual, RelationType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_string() {
        assert_eq!(Gender::from("M"), Gender::Male);
        assert_eq!(Gender::from("female"), Gender::Female);
        assert_eq!(Gender::from("?"), Gender::Unknown);
    }

    #[test]
    fn test_gender_matching() {
        let man = Individual::new("I1", "John /Smith/", Gender::Male);
        let woman = Individual::new("I2", "Mary /Smith/", Gender::Female);
        let unknown = Individual::new("I3", "Pat /Smith/", Gender::Unknown);
        assert!(!man.gender_matches(&woman));
        assert!(man.gender_matches(&unknown));
        assert!(unknown.gender_matches(&woman));
    }

    #[test]
    fn test_age_bounds_at_event() {
        let ind = Individual::new("I1", "John /Smith/", Gender::Male)
            .with_fact(Fact::new(FactType::Birth, "15 JUN 1850"));
        let exact = FactDate::new("14 JUN 1870");
        assert_eq!(ind.min_age_at(&exact), 19);
        assert_eq!(ind.max_age_at(&exact), 19);

        let year = FactDate::new("1870");
        assert_eq!(ind.min_age_at(&year), 19);
        assert_eq!(ind.max_age_at(&year), 20);
    }

    #[test]
    fn test_unknown_birth_gives_open_ages() {
        let ind = Individual::new("I1", "John /Smith/", Gender::Male);
        let when = FactDate::new("1900");
        assert_eq!(ind.min_age_at(&when), 0);
        assert_eq!(ind.max_age_at(&when), 110);
    }

    #[test]
    fn test_birth_falls_back_to_calculated_birth() {
        let ind = Individual::new("I1", "John /Smith/", Gender::Male)
            .with_fact(Fact::new(FactType::BirthCalc, "ABT 1850"));
        assert!(ind.birth_date().is_known());
        assert_eq!(ind.birth_date().year(), 1849);
    }

    #[test]
    fn test_new_individual_is_unset() {
        let ind = Individual::new("I1", "John /Smith/", Gender::Male);
        assert_eq!(ind.relation_type(), RelationType::Unset);
        assert_eq!(ind.ahnentafel(), 0);
        assert!(ind.relation_to_root().is_empty());
        assert!(ind.common_ancestor().is_none());
    }

    #[test]
    fn test_living_flag() {
        let ind = Individual::new("I1", "Ann /Lee/", Gender::Female).living();
        assert!(ind.flagged_as_living);
    }
}
