//! Weather message composition
//!
//! Builds the generation prompt from a snapshot and its report, invokes the
//! inference backend and enforces that two consecutive messages never read
//! the same.

use std::{fmt, sync::Arc};

use domain::{ComposedMessage, DedupState, SnapshotHistory, WeatherSnapshot, is_repeat};
use tracing::{debug, info, instrument, warn};

use super::report::WeatherReport;
use crate::{error::ApplicationError, ports::InferencePort};

const VARIATION_REQUEST: &str =
    "\nIMPORTANT: Please generate a completely different message than before.";

const GENERATION_INSTRUCTIONS: &str = "
Based on this weather data, generate a helpful, informative, and engaging message about the current weather. Make it natural and conversational.

Consider all the weather details provided, such as temperature, humidity, wind, precipitation, visibility, cloud cover, air quality, and astronomical information when relevant. If there are any notable weather conditions (extreme temperatures, storms, poor air quality, etc.), highlight those.

You can mention interesting weather facts or patterns if they're relevant to the current conditions. For example, if it's a full moon on a clear night, or if it's an unusually warm/cold day for the season.

If air quality information is provided, include health recommendations based on the AQI level.
";

/// State after the first generation
fn after_first_generation(candidate: &str, previous: Option<&str>) -> DedupState {
    if is_repeat(candidate, previous) {
        DedupState::DuplicateDetected
    } else {
        DedupState::Generated
    }
}

/// Terminal state after the variation retry; `None` means the retry failed
fn after_retry(retry: Option<&str>, previous: Option<&str>) -> DedupState {
    match retry {
        Some(text) if !is_repeat(text, previous) => DedupState::Retried,
        _ => DedupState::Disambiguated,
    }
}

/// Composes the published weather message
pub struct MessageComposer {
    inference: Arc<dyn InferencePort>,
    system_prompt: String,
}

impl fmt::Debug for MessageComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageComposer")
            .field("model", &self.inference.current_model())
            .field("system_prompt_len", &self.system_prompt.len())
            .finish_non_exhaustive()
    }
}

impl MessageComposer {
    pub fn new(inference: Arc<dyn InferencePort>, system_prompt: impl Into<String>) -> Self {
        Self {
            inference,
            system_prompt: system_prompt.into(),
        }
    }

    /// Full user prompt for one generation
    #[must_use]
    pub fn build_prompt(
        snapshot: &WeatherSnapshot,
        report: &WeatherReport,
        history_context: Option<&str>,
    ) -> String {
        let city = snapshot.place().name();
        let local = snapshot.local_time();
        let time_12h = local.format("%-I:%M %p");
        let time_24h = local.format("%H:%M");

        let mut prompt = format!(
            "IMPORTANT TIME INFORMATION:\n\
             The CURRENT LOCAL TIME in {city} is {time_12h} ({time_24h} in 24-hour format).\n\
             This is the accurate local time for this location.\n\
             DO NOT convert or adjust this time. It is already the correct local time.\n\
             You MUST use this exact time in your weather message.\n\n\
             Current Weather Data:\n"
        );
        prompt.push_str(&report.to_prompt_block());

        if let Some(context) = history_context.filter(|c| !c.is_empty()) {
            prompt.push_str("\n\nWeather history context:\n");
            prompt.push_str(context);
        }

        prompt.push_str(GENERATION_INSTRUCTIONS);
        prompt.push_str(&format!(
            "\nCRITICAL: The current local time in {city} is {time_12h}. \
             DO NOT modify or reinterpret this time. Reference this EXACT time in your response."
        ));
        prompt
    }

    /// Summary of the reading before the latest one
    #[must_use]
    pub fn history_digest(previous: &WeatherSnapshot) -> String {
        let obs = previous.observation();
        let temp_unit = obs.units.temperature_symbol();
        format!(
            "Previous weather ({}):\n\
             - Condition: {} ({})\n\
             - Temperature: {:.1}{temp_unit} (feels like {:.1}{temp_unit})\n\
             - Humidity: {}\n\
             - Wind: {:.1} {}\n",
            previous.local_time().format("%H:%M"),
            obs.condition.label(),
            obs.condition.description(),
            obs.temperature,
            obs.feels_like,
            obs.humidity,
            obs.wind_speed,
            obs.units.wind_speed_unit(),
        )
    }

    async fn generate(&self, prompt: &str) -> Result<String, ApplicationError> {
        let result = self
            .inference
            .generate_with_system(&self.system_prompt, prompt)
            .await?;
        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            "Weather message generated"
        );
        Ok(result.content)
    }

    /// Generate the message for `snapshot`
    ///
    /// `history` must already contain `snapshot` as its latest entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Generation`] when the first generation fails.
    #[instrument(skip_all, fields(city = %snapshot.place().name()))]
    pub async fn compose(
        &self,
        snapshot: &WeatherSnapshot,
        history: &SnapshotHistory,
        previous_message: Option<&str>,
    ) -> Result<ComposedMessage, ApplicationError> {
        let report = WeatherReport::from_snapshot(snapshot);
        let context = history
            .previous()
            .map(|prev| Self::history_digest(prev.as_ref()))
            .unwrap_or_default();

        let prompt = Self::build_prompt(snapshot, &report, Some(&context));
        let first = self
            .generate(&prompt)
            .await
            .map_err(|e| ApplicationError::Generation(e.to_string()))?;

        let state = after_first_generation(&first, previous_message);
        if state == DedupState::Generated {
            return Ok(ComposedMessage::new(first, state));
        }

        info!(?state, "Identical message generated, requesting a variation");
        let varied_context = format!("{context}{VARIATION_REQUEST}");
        let retry_prompt = Self::build_prompt(snapshot, &report, Some(&varied_context));
        let retry = match self.generate(&retry_prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Variation request failed");
                None
            },
        };

        let outcome = after_retry(retry.as_deref(), previous_message);
        let text = match (outcome, retry) {
            (DedupState::Retried, Some(text)) => text,
            _ => format!("[{}] {first}", snapshot.local_time().format("%H:%M")),
        };
        Ok(ComposedMessage::new(text, outcome))
    }
}
