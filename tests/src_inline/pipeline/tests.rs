use super::*;
use crate::input::discover_scans;
use crate::input::scores::parse_score_table;
use crate::model::verdict::{Category, RuleId, Severity};
use image::{Rgb, RgbImage};
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_cogrisk_pipeline_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &std::path::Path, name: &str) {
    RgbImage::from_pixel(32, 32, Rgb([90, 90, 90]))
        .save(dir.join(name))
        .unwrap();
}

fn screen_fixture() -> Vec<ScanRecord> {
    let dir = make_temp_dir();
    write_png(&dir, "a.png");
    write_png(&dir, "b.png");
    std::fs::write(dir.join("c.png"), b"corrupt").unwrap();
    write_png(&dir, "d.png");
    write_png(&dir, "e.png");

    let table = parse_score_table(
        r#"{
            "scans": {
                "a.png": { "screening": [0.05, 0.9, 0.05], "refinement": [0.05, 0.9, 0.05] },
                "c.png": { "screening": [0.05, 0.9, 0.05], "refinement": [0.05, 0.9, 0.05] },
                "d.png": { "screening": [0.05, 0.95], "refinement": [0.05, 0.9, 0.05] },
                "e.png": { "screening": [0.3, 0.3, 0.4], "refinement": [0.8, 0.1, 0.1] }
            }
        }"#,
    )
    .unwrap();
    let classifiers = ClassifierPair::from_score_table(table);
    let policy = ThresholdPolicy::default_v1();
    let ctx = ScreeningContext {
        classifiers: &classifiers,
        policy: &policy,
        range_policy: RangePolicy::PassThrough,
    };
    screen_scans(&discover_scans(&dir).unwrap(), &ctx)
}

fn failed_stage(record: &ScanRecord) -> Option<FailedStage> {
    match &record.status {
        ScanStatus::Failed { stage, .. } => Some(*stage),
        ScanStatus::Decided(_) => None,
    }
}

#[test]
fn test_one_record_per_scan_in_order() {
    let records = screen_fixture();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a.png", "b.png", "c.png", "d.png", "e.png"]);
}

#[test]
fn test_decided_scans() {
    let records = screen_fixture();
    let a = records[0].decided().unwrap();
    assert_eq!(a.decision.verdict.category, Category::Normal);
    assert_eq!(a.decision.verdict.severity, Severity::Benign);

    let e = records[4].decided().unwrap();
    assert_eq!(e.decision.verdict.category, Category::AlzheimersDisease);
    assert_eq!(e.decision.rule, RuleId::AdvancedRisk);
    assert_eq!(e.refinement.ad(), 0.8);
}

#[test]
fn test_failures_carry_no_verdict() {
    let records = screen_fixture();
    assert_eq!(failed_stage(&records[1]), Some(FailedStage::Infer));
    assert_eq!(failed_stage(&records[2]), Some(FailedStage::Normalize));
    assert_eq!(failed_stage(&records[3]), Some(FailedStage::Validate));
    for record in &records[1..4] {
        assert!(record.decided().is_none());
    }
}
