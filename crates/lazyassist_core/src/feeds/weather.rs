//! Weather lookups backed by the wttr.in JSON API.

use super::{get_json, http_agent, FeedError, FeedResult};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const WTTR_PROVIDER: &str = "wttr";
const WTTR_BASE_URL: &str = "https://wttr.in";
const FORECAST_DAYS: usize = 3;
/// wttr.in reports eight 3-hour slots per day; slot 4 is midday.
const MIDDAY_SLOT: usize = 4;

/// Current conditions plus a short forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature_c: Option<String>,
    pub temperature_f: Option<String>,
    pub condition: String,
    pub humidity: Option<String>,
    pub precipitation: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub icon: String,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastDay {
    pub date: Option<String>,
    pub max_temp_c: Option<String>,
    pub min_temp_c: Option<String>,
    pub condition: String,
    pub chance_of_rain: String,
}

/// Source of weather reports for a named location.
pub trait WeatherProvider {
    fn current(&self, location: &str) -> FeedResult<WeatherReport>;
}

impl<T: WeatherProvider + ?Sized> WeatherProvider for Box<T> {
    fn current(&self, location: &str) -> FeedResult<WeatherReport> {
        (**self).current(location)
    }
}

/// HTTP client for `wttr.in/{location}?format=j1`.
pub struct WttrWeatherProvider {
    agent: ureq::Agent,
    base_url: String,
}

impl WttrWeatherProvider {
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(WTTR_BASE_URL, timeout)
    }

    /// Points the provider at a different host, e.g. a local mirror.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: http_agent(timeout),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl WeatherProvider for WttrWeatherProvider {
    fn current(&self, location: &str) -> FeedResult<WeatherReport> {
        let url = wttr_location_url(&self.base_url, location)?;
        debug!("event=weather_fetch module=feeds status=start provider={WTTR_PROVIDER}");
        let body = get_json(WTTR_PROVIDER, self.agent.get(url.as_str()))?;
        parse_wttr_report(location, &body)
    }
}

/// Builds `{base_url}/{location}?format=j1` with the location as one
/// percent-encoded path segment. Spaces become `+`, which wttr.in reads as
/// spaces.
fn wttr_location_url(base_url: &str, location: &str) -> FeedResult<Url> {
    let invalid_base = |message: String| FeedError::Transport {
        provider: WTTR_PROVIDER,
        message,
    };

    let mut url = Url::parse(base_url)
        .map_err(|err| invalid_base(format!("invalid base url `{base_url}`: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| invalid_base(format!("base url `{base_url}` cannot carry a path")))?
        .pop_if_empty()
        .push(&location.trim().replace(' ', "+"));
    url.query_pairs_mut().append_pair("format", "j1");
    Ok(url)
}

/// Maps a wttr.in `format=j1` body into a [`WeatherReport`].
///
/// `requested_location` is used when the body names no nearest area.
pub fn parse_wttr_report(requested_location: &str, body: &Value) -> FeedResult<WeatherReport> {
    let current = body
        .pointer("/current_condition/0")
        .ok_or_else(|| FeedError::Decode {
            provider: WTTR_PROVIDER,
            message: "missing current_condition".to_string(),
        })?;

    let forecast = body
        .get("weather")
        .and_then(Value::as_array)
        .map(|days| days.iter().take(FORECAST_DAYS).map(parse_forecast_day).collect())
        .unwrap_or_default();

    Ok(WeatherReport {
        location: text_at(body, "/nearest_area/0/areaName/0/value")
            .unwrap_or_else(|| requested_location.to_string()),
        temperature_c: text_at(current, "/temp_C"),
        temperature_f: text_at(current, "/temp_F"),
        condition: text_at(current, "/weatherDesc/0/value").unwrap_or_else(unknown),
        humidity: text_at(current, "/humidity"),
        precipitation: text_at(current, "/precipMM"),
        wind_speed: text_at(current, "/windspeedKmph"),
        wind_direction: text_at(current, "/winddir16Point"),
        icon: text_at(current, "/weatherIconUrl/0/value").unwrap_or_default(),
        forecast,
    })
}

fn parse_forecast_day(day: &Value) -> ForecastDay {
    let midday = format!("/hourly/{MIDDAY_SLOT}");
    ForecastDay {
        date: text_at(day, "/date"),
        max_temp_c: text_at(day, "/maxtempC"),
        min_temp_c: text_at(day, "/mintempC"),
        condition: text_at(day, &format!("{midday}/weatherDesc/0/value")).unwrap_or_else(unknown),
        chance_of_rain: text_at(day, &format!("{midday}/chanceofrain"))
            .unwrap_or_else(|| "0".to_string()),
    }
}

fn text_at(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn unknown() -> String {
    "Unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_wttr_report, wttr_location_url};
    use crate::feeds::FeedError;
    use serde_json::json;

    #[test]
    fn parses_current_conditions_and_caps_forecast_at_three_days() {
        let hourly = |desc: &str| {
            json!([{}, {}, {}, {},
                {"weatherDesc": [{"value": desc}], "chanceofrain": "40"}])
        };
        let body = json!({
            "current_condition": [{
                "temp_C": "18",
                "temp_F": "64",
                "weatherDesc": [{"value": "Partly cloudy"}],
                "humidity": "71",
                "precipMM": "0.0",
                "windspeedKmph": "11",
                "winddir16Point": "WSW",
                "weatherIconUrl": [{"value": "https://example.test/icon.png"}]
            }],
            "nearest_area": [{"areaName": [{"value": "Paris"}]}],
            "weather": [
                {"date": "2024-05-01", "maxtempC": "20", "mintempC": "11", "hourly": hourly("Sunny")},
                {"date": "2024-05-02", "maxtempC": "21", "mintempC": "12", "hourly": hourly("Rain")},
                {"date": "2024-05-03", "maxtempC": "19", "mintempC": "10", "hourly": hourly("Mist")},
                {"date": "2024-05-04", "maxtempC": "18", "mintempC": "9", "hourly": hourly("Fog")}
            ]
        });

        let report = parse_wttr_report("paris", &body).unwrap();
        assert_eq!(report.location, "Paris");
        assert_eq!(report.temperature_c.as_deref(), Some("18"));
        assert_eq!(report.condition, "Partly cloudy");
        assert_eq!(report.forecast.len(), 3);
        assert_eq!(report.forecast[1].condition, "Rain");
        assert_eq!(report.forecast[1].chance_of_rain, "40");
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let body = json!({
            "current_condition": [{}],
            "weather": [{"date": "2024-05-01"}]
        });

        let report = parse_wttr_report("oslo", &body).unwrap();
        assert_eq!(report.location, "oslo");
        assert_eq!(report.condition, "Unknown");
        assert_eq!(report.icon, "");
        assert_eq!(report.forecast[0].condition, "Unknown");
        assert_eq!(report.forecast[0].chance_of_rain, "0");
    }

    #[test]
    fn missing_current_condition_is_a_decode_error() {
        let err = parse_wttr_report("oslo", &json!({})).unwrap_err();
        assert!(matches!(err, FeedError::Decode { provider: "wttr", .. }));
    }

    #[test]
    fn location_is_encoded_as_a_single_path_segment() {
        let url = wttr_location_url("https://wttr.in", "room #5").unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/room+%235?format=j1");
        assert_eq!(url.fragment(), None);

        let url = wttr_location_url("https://wttr.in", " new york ").unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/new+york?format=j1");

        let url = wttr_location_url("http://127.0.0.1:8080/mirror", "a/b?c").unwrap();
        assert_eq!(url.path(), "/mirror/a%2Fb%3Fc");
        assert_eq!(url.query(), Some("format=j1"));
    }

    #[test]
    fn unusable_base_url_is_a_transport_error() {
        let err = wttr_location_url("not a url", "paris").unwrap_err();
        assert!(matches!(err, FeedError::Transport { provider: "wttr", .. }));
    }
}
