use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionForm {
    pub name: String,
    pub attendance: String,
    pub gpa: String,
    pub participation: String,
    pub stress: String,
    pub family_income: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub name: String,
    pub attendance: f64,
    pub gpa: f64,
    pub participation: f64,
    pub stress: f64,
    pub family_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unrecognized,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Unrecognized => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// An assessment the service has stored, as listed by `/api/students`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRecord {
    pub id: i64,
    pub name: String,
    pub attendance: f64,
    pub gpa: f64,
    pub participation: f64,
    pub stress: f64,
    pub family_income: f64,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct RiskLevelSummary {
    pub risk_level: RiskLevel,
    pub count: usize,
    pub avg_score: f64,
}
