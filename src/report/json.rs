use crate::types::report::ScoreboardReport;

pub fn to_json(report: &ScoreboardReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::fixtures::sample;
    use crate::report::build_report;
    use crate::report::tests::admin_config;

    #[test]
    fn json_report_flattens_entries() {
        let pool = sample().season(2026);
        let report = build_report(&pool, &admin_config(), None);

        let rendered = to_json(&report).expect("json should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json should parse");
        assert_eq!(value["year"], 2026);
        assert_eq!(value["podium"][0]["place"], 1);
        assert_eq!(value["podium"][0]["points"], 0);
        assert!(value["podium"][0]["prediction_id"].is_string());
        assert!(value["predictions"][0]["picks"].is_null());
    }
}
