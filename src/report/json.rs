use crate::report::SummaryData;

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json)
}
