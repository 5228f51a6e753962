use anyhow::Context;
use kinship::utils::logging::{create_spinner, finish_and_clear};
use kinship::utils::test::{random_tree, sample_tree};
use kinship::{
    AnalyzerConfig, CancellationToken, DataQualityChecker, DuplicateScanner, RelationshipClassifier,
    ScanOutcome,
};
use log::{info, warn};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    kinship::init_logging();

    // Optional arguments: random tree size and seed; the sample tree otherwise
    let mut args = std::env::args().skip(1);
    let size = args.next().map(|s| s.parse::<usize>()).transpose().context("tree size")?;
    let seed = args.next().map(|s| s.parse::<u64>()).transpose().context("seed")?;

    let config = match std::env::var("KINSHIP_CONFIG") {
        Ok(json) => AnalyzerConfig::from_json_str(&json).context("KINSHIP_CONFIG")?,
        Err(_) => AnalyzerConfig::default(),
    };
    info!("{config}");

    let mut tree = match size {
        Some(size) => random_tree(seed.unwrap_or(42), size)?,
        None => sample_tree()?,
    };
    tree.fix_ids();
    let root = tree
        .individuals()
        .next()
        .map(|(_, ind)| ind.id().to_string())
        .context("tree has no individuals")?;

    // Relationship classification
    let start = Instant::now();
    let spinner = create_spinner(Some("Classifying relationships"));
    let classification = RelationshipClassifier::new(config.classifier.clone()).classify(&mut tree, &root);
    finish_and_clear(&spinner);
    let classification = classification?;
    info!("Classified {} individuals in {:?}", tree.len(), start.elapsed());
    for conflict in &classification.conflicts {
        warn!("{}", conflict.message);
    }
    for (_, individual) in tree.individuals().take(20) {
        info!(
            "{:<8} {:<28} {:<22} {}",
            individual.id(),
            individual.name(),
            individual.relation_type(),
            individual.relation_to_root()
        );
    }

    // Duplicate scan
    let mut scanner = DuplicateScanner::new(config.duplicates.clone())?;
    match scanner.scan(&tree, &CancellationToken::new())? {
        ScanOutcome::Completed(report) => {
            info!(
                "{} duplicate candidates from {} comparisons",
                report.candidates.len(),
                report.comparisons
            );
            for record in report.records(&tree).iter().take(10) {
                info!(
                    "{:>5}  {} ({}) / {} ({})",
                    record.score, record.name_a, record.id_a, record.name_b, record.id_b
                );
            }
        }
        ScanOutcome::Cancelled => warn!("Duplicate scan cancelled"),
    }

    // Data quality
    let report = DataQualityChecker::new(config.data_quality.clone()).report(&tree);
    info!("{report}");
    for group in report.non_empty() {
        for error in group.errors.iter().take(3) {
            info!("  {error}");
        }
    }

    Ok(())
}
