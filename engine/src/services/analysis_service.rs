// Facade the CLI (or any page controller) uses to reach the core
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use shared::models::{Contribution, GoalAnalysis};
use tracing::info;

use crate::config::EngineSettings;
use crate::data::contribution_csv::ContributionCsvLoader;
use crate::data::goal_input::GoalRequest;
use crate::error::EngineError;
use crate::goals::analyze_goal;
use crate::screener::{Normalize, RawScreenerFilters, ScreenerPayload, SCREENER_RUN_PATH};

pub struct AnalysisService {
    settings: EngineSettings,
}

impl AnalysisService {
    pub fn new(settings: EngineSettings) -> Self {
        AnalysisService { settings }
    }

    /// Validates the request, appends `extra_contributions` to its own
    /// history and runs the calculator.
    pub fn analyze_goal_request(
        &self,
        request: GoalRequest,
        extra_contributions: Vec<Contribution>,
        today: NaiveDate,
    ) -> Result<GoalAnalysis, EngineError> {
        let (goal, mut contributions) = request.into_goal()?;
        contributions.extend(extra_contributions);
        info!(
            goal = goal.name.as_deref().unwrap_or("<unnamed>"),
            contributions = contributions.len(),
            %today,
            "Analyzing goal"
        );
        Ok(analyze_goal(&goal, &contributions, today, &self.settings.goals))
    }

    pub fn analyze_goal_files(
        &self,
        goal_path: &Path,
        contributions_csv: Option<&Path>,
        today: NaiveDate,
    ) -> Result<GoalAnalysis, EngineError> {
        let request = GoalRequest::load(goal_path)?;
        let extra = match contributions_csv {
            Some(path) => ContributionCsvLoader::load_from_path(path)
                .map_err(|e| EngineError::CsvDataFormatError(format!("{:#}", e)))?,
            None => Vec::new(),
        };
        self.analyze_goal_request(request, extra, today)
    }

    pub fn screener_payload(&self, raw: &RawScreenerFilters) -> ScreenerPayload {
        let payload = raw.normalize_with(&self.settings.screener);
        info!(endpoint = SCREENER_RUN_PATH, sort = %payload.sort, limit = payload.limit, "Built screener payload");
        payload
    }

    /// Reads raw form input (market cap in millions).
    pub fn screener_payload_file(&self, path: &Path) -> Result<ScreenerPayload, EngineError> {
        let contents = fs::read_to_string(path)?;
        let raw: RawScreenerFilters = serde_json::from_str(&contents)?;
        Ok(self.screener_payload(&raw))
    }

    /// Reads an already-built payload (base units) and re-canonicalizes it
    /// without converting units again.
    pub fn renormalize_payload_file(&self, path: &Path) -> Result<ScreenerPayload, EngineError> {
        let contents = fs::read_to_string(path)?;
        let existing: ScreenerPayload = serde_json::from_str(&contents)?;
        let payload = existing.normalize_with(&self.settings.screener);
        info!(endpoint = SCREENER_RUN_PATH, sort = %payload.sort, limit = payload.limit, "Re-normalized screener payload");
        Ok(payload)
    }
}
