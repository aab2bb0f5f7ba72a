use std::path::Path;

use tracing::{info, warn};

use crate::api::SupportApi;
use crate::error::FormError;
use crate::models::{PredictionForm, PredictionRequest, PredictionResult};
use crate::risk::{self, RiskScheme};

pub const PREDICTION_FAILED: &str =
    "Failed to get prediction. Please make sure the backend server is running.";

impl PredictionForm {
    pub fn set_stress_score(&mut self, score: f64) {
        self.stress = format!("{score:.1}");
    }

    // Same ranges as the form inputs.
    pub fn parse(&self) -> Result<PredictionRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        Ok(PredictionRequest {
            name: name.to_string(),
            attendance: parse_field("attendance", &self.attendance, 0.0, 100.0)?,
            gpa: parse_field("gpa", &self.gpa, 0.0, 10.0)?,
            participation: parse_field("participation", &self.participation, 1.0, 10.0)?,
            stress: parse_field("stress", &self.stress, 1.0, 10.0)?,
            family_income: parse_field("family_income", &self.family_income, 0.0, f64::INFINITY)?,
        })
    }
}

fn parse_field(field: &'static str, raw: &str, min: f64, max: f64) -> Result<f64, FormError> {
    let value: f64 = raw.trim().parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        });
    }

    if value < min || value > max {
        return Err(FormError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    Ok(value)
}

#[derive(Debug, Default)]
pub struct PredictionPage {
    pub result: Option<PredictionResult>,
    pub error: Option<String>,
}

impl PredictionPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(&self) -> Option<RiskScheme> {
        self.result.as_ref().map(|result| risk::scheme_for(result.risk_level))
    }

    /// Service failures set the fixed error banner and leave any earlier result.
    pub async fn submit(
        &mut self,
        api: &SupportApi,
        form: &PredictionForm,
    ) -> Result<(), FormError> {
        let request = form.parse()?;

        self.error = None;

        match api.predict(&request).await {
            Ok(result) => {
                info!(
                    name = %request.name,
                    level = result.risk_level.label(),
                    score = result.risk_score,
                    "prediction received"
                );
                self.result = Some(result);
            }
            Err(err) => {
                warn!(error = %err, "prediction request failed");
                self.error = Some(PREDICTION_FAILED.to_string());
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub outcome: Result<PredictionResult, String>,
}

pub fn load_forms(csv_path: &Path) -> anyhow::Result<Vec<PredictionForm>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)?;
    let mut forms = Vec::new();

    for row in reader.deserialize::<PredictionForm>() {
        forms.push(row?);
    }

    Ok(forms)
}

pub async fn run_batch(api: &SupportApi, forms: &[PredictionForm]) -> Vec<BatchOutcome> {
    let mut outcomes = Vec::with_capacity(forms.len());

    for form in forms {
        let outcome = match form.parse() {
            Ok(request) => api
                .predict(&request)
                .await
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };

        if let Err(reason) = &outcome {
            warn!(name = %form.name, %reason, "batch row failed");
        }

        outcomes.push(BatchOutcome {
            name: form.name.clone(),
            outcome,
        });
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;
    use crate::risk::{RiskColor, RiskIcon};
    use std::io::Write;

    fn sample_form() -> PredictionForm {
        PredictionForm {
            name: "Avery Lee".to_string(),
            attendance: "72.5".to_string(),
            gpa: "5.8".to_string(),
            participation: "4".to_string(),
            stress: "8.6".to_string(),
            family_income: "28000".to_string(),
        }
    }

    #[test]
    fn parses_valid_form() {
        let request = sample_form().parse().unwrap();
        assert_eq!(request.name, "Avery Lee");
        assert_eq!(request.attendance, 72.5);
        assert_eq!(request.participation, 4.0);
        assert_eq!(request.family_income, 28000.0);
    }

    #[test]
    fn rejects_non_numeric_field() {
        let mut form = sample_form();
        form.gpa = "B+".to_string();
        assert_eq!(
            form.parse(),
            Err(FormError::InvalidNumber {
                field: "gpa",
                value: "B+".to_string()
            })
        );
    }

    #[test]
    fn rejects_nan_literal() {
        let mut form = sample_form();
        form.attendance = "NaN".to_string();
        assert!(matches!(
            form.parse(),
            Err(FormError::InvalidNumber { field: "attendance", .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_field() {
        let mut form = sample_form();
        form.participation = "0".to_string();
        assert!(matches!(
            form.parse(),
            Err(FormError::OutOfRange { field: "participation", .. })
        ));
    }

    #[test]
    fn rejects_blank_name() {
        let mut form = sample_form();
        form.name = "   ".to_string();
        assert_eq!(form.parse(), Err(FormError::MissingName));
    }

    #[test]
    fn stress_score_is_written_with_one_decimal() {
        let mut form = sample_form();
        form.set_stress_score(7.0);
        assert_eq!(form.stress, "7.0");
    }

    #[tokio::test]
    async fn successful_prediction_selects_high_scheme() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/predict")
            .with_status(200)
            .with_body(r#"{"risk_level":"High","risk_score":82,"recommendations":["Seek tutoring"]}"#)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut page = PredictionPage::new();
        page.submit(&api, &sample_form()).await.unwrap();

        let result = page.result.as_ref().unwrap();
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.recommendations.len(), 1);
        let scheme = page.scheme().unwrap();
        assert_eq!(scheme.color, RiskColor::Red);
        assert_eq!(scheme.icon, RiskIcon::Warning);
        assert!(page.error.is_none());
    }

    #[tokio::test]
    async fn new_submission_clears_previous_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/predict")
            .with_status(200)
            .with_body(r#"{"risk_level":"Low","risk_score":88,"recommendations":[]}"#)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut page = PredictionPage {
            error: Some(PREDICTION_FAILED.to_string()),
            ..PredictionPage::default()
        };
        page.submit(&api, &sample_form()).await.unwrap();

        assert!(page.error.is_none());
        assert!(page.result.is_some());
    }

    #[tokio::test]
    async fn failed_prediction_sets_fixed_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/predict")
            .with_status(500)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut page = PredictionPage::new();
        page.submit(&api, &sample_form()).await.unwrap();

        assert_eq!(page.error.as_deref(), Some(PREDICTION_FAILED));
        assert!(page.result.is_none());
        assert!(page.scheme().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_previous_result() {
        let previous = PredictionResult {
            risk_level: RiskLevel::Low,
            risk_score: 91.0,
            recommendations: vec!["Keep it up".to_string()],
        };
        let mut page = PredictionPage {
            result: Some(previous.clone()),
            ..PredictionPage::default()
        };

        // Nothing listens on port 9; the connection is refused.
        let api = SupportApi::new("http://127.0.0.1:9").unwrap();
        page.submit(&api, &sample_form()).await.unwrap();

        assert_eq!(page.result, Some(previous));
        assert_eq!(page.error.as_deref(), Some(PREDICTION_FAILED));
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/predict")
            .expect(0)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let mut page = PredictionPage::new();
        let mut form = sample_form();
        form.stress = "very".to_string();

        assert!(page.submit(&api, &form).await.is_err());
        mock.assert_async().await;
        assert!(page.error.is_none());
    }

    #[tokio::test]
    async fn batch_records_each_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,attendance,gpa,participation,stress,family_income").unwrap();
        writeln!(file, "Avery Lee, 72.5, 5.8, 4, 8.6, 28000").unwrap();
        writeln!(file, "Jules Moreno,abc,7.0,6,3.2,54000").unwrap();
        file.flush().unwrap();

        let forms = load_forms(file.path()).unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].attendance, "72.5");

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/predict")
            .with_status(200)
            .with_body(r#"{"risk_level":"Medium","risk_score":64,"recommendations":[]}"#)
            .expect(1)
            .create_async()
            .await;

        let api = SupportApi::new(server.url()).unwrap();
        let outcomes = run_batch(&api, &forms).await;

        mock.assert_async().await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].outcome.is_ok());
        assert!(outcomes[1].outcome.as_ref().unwrap_err().contains("attendance"));
    }
}
