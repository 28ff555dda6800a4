use chrono::{DateTime, Utc};
use clap::Args;
use listing_match::config::AppConfig;
use listing_match::error::AppError;
use listing_match::import::CsvImporter;
use listing_match::matching::{
    DismissedMatches, MatchFinder, MatchResult, MatchSummary, TeamDirectory,
};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// CSV export of listings
    #[arg(long)]
    pub(crate) listings: PathBuf,
    /// CSV export of customer requests
    #[arg(long)]
    pub(crate) requests: PathBuf,
    /// Optional CSV of agent ids and display names
    #[arg(long)]
    pub(crate) team: Option<PathBuf>,
    /// Minimum total score to report (defaults to MATCH_MIN_SCORE or 30)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) min_score: Option<u8>,
    /// Comma separated match ids (`request:listing`) to leave out
    #[arg(long, value_delimiter = ',')]
    pub(crate) dismissed: Vec<String>,
    /// Worker threads used to score requests (defaults to MATCH_WORKERS or 1)
    #[arg(long)]
    pub(crate) workers: Option<usize>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

/// Ranked matches plus their roll-up, as returned by the CLI and the HTTP API.
#[derive(Debug, Serialize)]
pub(crate) struct MatchReport {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) min_score: u8,
    pub(crate) summary: MatchSummary,
    pub(crate) matches: Vec<MatchResult>,
}

impl MatchReport {
    pub(crate) fn new(matches: Vec<MatchResult>, min_score: u8) -> Self {
        Self {
            generated_at: Utc::now(),
            min_score,
            summary: MatchSummary::from_results(&matches),
            matches,
        }
    }
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        listings,
        requests,
        team,
        min_score,
        dismissed,
        workers,
        json,
    } = args;

    let mut config = AppConfig::load()?.matching;
    if let Some(min_score) = min_score {
        config.min_score = min_score;
    }
    if let Some(workers) = workers {
        config.workers = workers.max(1);
    }

    let listings = CsvImporter::listings_from_path(&listings)?;
    let requests = CsvImporter::requests_from_path(&requests)?;
    let team = team
        .map(|path| CsvImporter::team_from_path(&path))
        .transpose()?;
    let directory = team.as_ref().map(|team| team as &dyn TeamDirectory);

    let finder = MatchFinder::new(config);
    let results = finder.find(&listings, &requests, directory);
    let dismissed: DismissedMatches = dismissed.into_iter().collect();
    let report = MatchReport::new(dismissed.retain_visible(results), finder.config().min_score);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", TextReport(&report));
    }

    Ok(())
}

/// Plain-text rendering of a report for terminal output.
pub(crate) struct TextReport<'a>(pub(crate) &'a MatchReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let summary = &report.summary;

        writeln!(
            f,
            "{} matches at min score {}",
            summary.total, report.min_score
        )?;
        if summary.total == 0 {
            return Ok(());
        }

        writeln!(
            f,
            "perfect {} | good {} | medium {} | low {} | cross-consultant {}",
            summary.perfect, summary.good, summary.medium, summary.low, summary.cross_consultant
        )?;
        if let (Some(top), Some(average)) = (summary.top_score, summary.average_score) {
            writeln!(f, "top score {top} | average {average:.1}")?;
        }

        for result in &report.matches {
            writeln!(
                f,
                "\n{:>3}  {:<7}  {} -> {}",
                result.total_score,
                result.badge.label(),
                result.request.id,
                result.listing.id
            )?;
            if !result.reasons.is_empty() {
                writeln!(f, "     {}", result.reasons.join(", "))?;
            }
            for criterion in result
                .criteria
                .iter()
                .filter(|criterion| criterion.max_score > 0)
            {
                writeln!(
                    f,
                    "     - {}: {}/{} {}",
                    criterion.label, criterion.score, criterion.max_score, criterion.message
                )?;
            }
            if result.is_cross_consultant {
                writeln!(
                    f,
                    "     cross-consultant: {} -> {}",
                    result.request_owner_name.as_deref().unwrap_or("unknown"),
                    result.property_owner_name.as_deref().unwrap_or("unknown")
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_match::matching::{find_matches, AgentId, Listing, ListingId, PropertyRequest};
    use listing_match::matching::{RequestId, RequestStatus};
    use std::collections::HashMap;

    fn sample_pair() -> (Listing, PropertyRequest) {
        let listing = Listing {
            id: ListingId("lst-1".to_string()),
            transaction_type: Some("Satılık".to_string()),
            property_type: Some("Apartment".to_string()),
            price: Some(2_500_000.0),
            rooms: Some("3+1".to_string()),
            net_area: Some(120.0),
            city: Some("İstanbul".to_string()),
            district: Some("Kadıköy".to_string()),
            owner_id: Some(AgentId("u2".to_string())),
            ..Listing::default()
        };
        let request = PropertyRequest {
            id: RequestId("req-1".to_string()),
            status: Some(RequestStatus::Active),
            transaction_type: Some("Satılık".to_string()),
            property_type: Some("Apartment".to_string()),
            min_price: Some(2_000_000.0),
            max_price: Some(3_000_000.0),
            rooms: Some("3+1".to_string()),
            min_area: Some(100.0),
            max_area: Some(140.0),
            city: Some("İstanbul".to_string()),
            district: Some("Kadıköy".to_string()),
            owner_id: Some(AgentId("u1".to_string())),
            ..PropertyRequest::default()
        };
        (listing, request)
    }

    #[test]
    fn text_report_lists_scores_and_owners() {
        let (listing, request) = sample_pair();
        let team: HashMap<_, _> = [
            (AgentId("u1".to_string()), "Ayşe Yılmaz".to_string()),
            (AgentId("u2".to_string()), "Mehmet Demir".to_string()),
        ]
        .into_iter()
        .collect();
        let results = find_matches(&[listing], &[request], Some(&team), 30);

        let text = TextReport(&MatchReport::new(results, 30)).to_string();

        assert!(text.starts_with("1 matches at min score 30"));
        assert!(text.contains("100  perfect  req-1 -> lst-1"));
        assert!(text.contains("- Price: 20/20 price within budget"));
        assert!(text.contains("cross-consultant: Ayşe Yılmaz -> Mehmet Demir"));
    }

    #[test]
    fn empty_report_has_only_the_headline() {
        let text = TextReport(&MatchReport::new(Vec::new(), 50)).to_string();
        assert_eq!(text, "0 matches at min score 50\n");
    }

    #[test]
    fn json_report_carries_summary_and_matches() {
        let (listing, request) = sample_pair();
        let results = find_matches(&[listing], &[request], None, 30);

        let value = serde_json::to_value(MatchReport::new(results, 30)).expect("serializes");

        assert_eq!(value["summary"]["total"], 1);
        assert_eq!(value["matches"][0]["badge"], "perfect");
        assert_eq!(value["matches"][0]["is_cross_consultant"], true);
        assert!(value["generated_at"].is_string());
    }
}
