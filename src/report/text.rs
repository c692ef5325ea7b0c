use crate::report::{CategoryStat, SummaryData, format_f32_6};

pub const DISCLAIMER: &str =
    "This system is for screening support only and not a medical diagnosis.";

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Cognitive Impairment Risk Screening Report\n");
    out.push_str("==========================================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!("Tool: {} {}\n", data.tool, data.tool_version));
    out.push_str(&format!(
        "Scans: {} (decided {}, failed {})\n\n",
        data.n_scans, data.n_decided, data.n_failed
    ));

    out.push_str("2. Threshold policy\n");
    out.push_str(&format!(
        "Refinement AD low: {}\nRefinement AD high: {}\nScreening AD ceiling: {}\n",
        format_f32_6(data.policy.refinement_ad_low()),
        format_f32_6(data.policy.refinement_ad_high()),
        format_f32_6(data.policy.screening_ad_ceiling())
    ));
    out.push_str(&format!(
        "Out-of-range probabilities: {}\n\n",
        data.range_policy
    ));

    out.push_str("3. Verdicts\n");
    for stat in &data.categories {
        out.push_str(&format!(
            "{}: {} ({})\n",
            stat.label,
            stat.count,
            percent(stat.fraction)
        ));
    }
    out.push_str(&format!("Overall: {}\n", overall_statement(&data.categories)));
    let safety_net = data
        .rules
        .iter()
        .find(|r| r.name == "safety_net")
        .map(|r| r.count)
        .unwrap_or(0);
    if safety_net > 0 {
        out.push_str(&format!(
            "{} scan(s) had a low refinement AD signal the screening model did not corroborate; these are reported as early impairment.\n",
            safety_net
        ));
    }
    out.push('\n');

    out.push_str("4. Failures\n");
    if data.failures.is_empty() {
        out.push_str("None.\n");
    } else {
        for failure in &data.failures {
            out.push_str(&format!(
                "{} [{}]: {}\n",
                failure.scan, failure.stage, failure.reason
            ));
        }
        out.push_str("Failed scans have no verdict.\n");
    }
    out.push('\n');

    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

fn percent(fraction: f32) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn overall_statement(categories: &[CategoryStat]) -> &'static str {
    let concerning: usize = categories
        .iter()
        .filter(|c| c.name != "normal")
        .map(|c| c.count)
        .sum();
    let total: usize = categories.iter().map(|c| c.count).sum();
    if total == 0 {
        "No scans were decided."
    } else if concerning == 0 {
        "No cognitive risk signal in any decided scan."
    } else if concerning == total {
        "Every decided scan carries a cognitive risk signal."
    } else {
        "Some decided scans carry a cognitive risk signal."
    }
}
