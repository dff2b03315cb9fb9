use crate::domain::chart::{ChartSpec, ChartVariant, ValueKind};
use crate::domain::metric::MetricCategory;
use serde::Deserialize;
use std::path::PathBuf;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub oauth: OAuthSettings,
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorization_url: String,
    pub token_url: String,
    pub scopes: Vec<String>,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: "http://localhost:8080/callback".to_string(),
            authorization_url: "https://api.prod.whoop.com/oauth/oauth2/auth".to_string(),
            token_url: "https://api.prod.whoop.com/oauth/oauth2/token".to_string(),
            scopes: [
                "read:recovery",
                "read:cycles",
                "read:sleep",
                "read:workout",
                "read:profile",
                "read:body_measurement",
                "offline",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl OAuthSettings {
    pub fn require_credentials(&self) -> anyhow::Result<()> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            anyhow::bail!("WHOOP_CLIENT_ID and WHOOP_CLIENT_SECRET must be set (environment or config/app.toml)");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub record_limit: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.prod.whoop.com/developer/v2".to_string(),
            record_limit: 25,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub token_file: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            token_file: PathBuf::from("tokens.json"),
            output_dir: PathBuf::from("."),
        }
    }
}

/// One `[[charts]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub metric: MetricCategory,
    pub field: String,
    pub divide_by: Option<f64>,
    pub unit: Option<ValueKind>,
    pub color: Option<String>,
    pub ceiling: Option<f64>,
    pub limit: Option<usize>,
    pub variant: Option<ChartVariant>,
}

impl ChartConfig {
    pub fn to_spec(&self) -> ChartSpec {
        let mut spec = ChartSpec::new(
            self.id.clone(),
            self.title.clone(),
            self.metric,
            &self.field,
            self.variant.unwrap_or(ChartVariant::Line),
        )
        .with_unit(self.unit.unwrap_or(ValueKind::Unitless))
        .with_divisor(self.divide_by.unwrap_or(1.0));

        if let Some(color) = &self.color {
            spec = spec.with_color(color.clone());
        }
        spec.ceiling = self.ceiling;
        spec.limit = self.limit;
        spec
    }
}

impl AppConfig {
    /// Configured charts, or the built-in set when none are configured.
    pub fn chart_specs(&self) -> Vec<ChartSpec> {
        if self.charts.is_empty() {
            default_charts()
        } else {
            self.charts.iter().map(ChartConfig::to_spec).collect()
        }
    }
}

pub fn default_charts() -> Vec<ChartSpec> {
    use ChartVariant::{Bar, Line, Terminal};
    use MetricCategory::{Cycles, Recovery, Sleep};

    let in_bed = "stage_summary.total_in_bed_time_milli";
    let performance = "sleep_performance_percentage";

    vec![
        ChartSpec::new("sleep_duration", "Sleep Duration (hours)", Sleep, in_bed, Line)
            .with_divisor(MILLIS_PER_HOUR)
            .with_unit(ValueKind::Duration)
            .with_color("#9D4EDD"),
        ChartSpec::new("recovery_score", "Recovery Score", Recovery, "recovery_score", Line).with_color("#06D6A0"),
        ChartSpec::new("strain_score", "Strain Score", Cycles, "strain", Line).with_color("#FF6B6B"),
        ChartSpec::new("sleep_performance", "Sleep Performance (%)", Sleep, performance, Line)
            .with_unit(ValueKind::Percentage)
            .with_color("#4CC9F0"),
        ChartSpec::new("recovery_terminal", "recovery --days 25", Recovery, "recovery_score", Terminal)
            .with_color("#39FF14")
            .with_ceiling(100.0),
        ChartSpec::new("recovery_compact", "Recovery", Recovery, "recovery_score", Bar)
            .with_color("#06d6a0")
            .with_ceiling(100.0)
            .with_limit(5),
        ChartSpec::new("strain_compact", "Strain", Cycles, "strain", Bar)
            .with_color("#ff6b6b")
            .with_ceiling(21.0)
            .with_limit(5),
        ChartSpec::new("sleep_performance_compact", "Sleep Quality", Sleep, performance, Bar)
            .with_unit(ValueKind::Percentage)
            .with_color("#4cc9f0")
            .with_ceiling(100.0)
            .with_limit(5),
        ChartSpec::new("sleep_hours_week", "Sleep (7 days)", Sleep, in_bed, Bar)
            .with_divisor(MILLIS_PER_HOUR)
            .with_unit(ValueKind::Duration)
            .with_color("#9D4EDD")
            .with_limit(7),
    ]
}

/// Layered load: optional file, `FITNESS_*` environment, then the vendor's
/// conventional `WHOOP_CLIENT_ID` / `WHOOP_CLIENT_SECRET` / `REDIRECT_URI`.
pub fn load_app_config(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("FITNESS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("oauth.client_id", std::env::var("WHOOP_CLIENT_ID").ok())?
        .set_override_option("oauth.client_secret", std::env::var("WHOOP_CLIENT_SECRET").ok())?
        .set_override_option("oauth.redirect_uri", std::env::var("REDIRECT_URI").ok())?
        .build()?;

    Ok(settings.try_deserialize()?)
}
