#[derive(Debug, Clone, PartialEq)]
pub struct InsightReport {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub metrics: [(&'static str, &'static str); 4],
    pub insights: [&'static str; 4],
}

pub static REPORTS: [InsightReport; 4] = [
    InsightReport {
        id: "overview",
        title: "System Overview Report",
        summary: "Comprehensive analysis of student performance and risk factors",
        metrics: [
            ("Total Students Analyzed", "1,247"),
            ("High Risk Students", "89"),
            ("Successful Interventions", "156"),
            ("Average Risk Reduction", "23%"),
        ],
        insights: [
            "Student engagement has improved by 15% over the last quarter",
            "Early intervention programs show 87% success rate",
            "Financial stress remains the top risk factor for dropout",
            "Students with regular counseling sessions show 40% better outcomes",
        ],
    },
    InsightReport {
        id: "risk-analysis",
        title: "Risk Analysis Report",
        summary: "Detailed breakdown of dropout risk factors and predictions",
        metrics: [
            ("Prediction Accuracy", "94.7%"),
            ("False Positives", "3.2%"),
            ("Early Detection Rate", "91.5%"),
            ("Risk Factors Identified", "12"),
        ],
        insights: [
            "Academic performance is the strongest predictor of dropout risk",
            "Attendance patterns show early warning signs 6 weeks before critical point",
            "Stress levels correlate strongly with academic decline",
            "Family income impacts retention rates significantly",
        ],
    },
    InsightReport {
        id: "student-progress",
        title: "Student Progress Report",
        summary: "Individual and cohort progress tracking and outcomes",
        metrics: [
            ("Students Improved", "892"),
            ("Average GPA Increase", "0.7"),
            ("Attendance Improvement", "12%"),
            ("Completion Rate", "88.3%"),
        ],
        insights: [
            "Students using the counseling system show 25% better retention",
            "Regular check-ins improve academic performance by 18%",
            "Peer support programs increase engagement significantly",
            "Personalized intervention plans are 60% more effective",
        ],
    },
    InsightReport {
        id: "intervention",
        title: "Intervention Effectiveness Report",
        summary: "Analysis of intervention strategies and their success rates",
        metrics: [
            ("Interventions Deployed", "234"),
            ("Success Rate", "78.2%"),
            ("Average Response Time", "2.3 days"),
            ("Cost per Intervention", "$127"),
        ],
        insights: [
            "Academic tutoring shows highest success rate at 89%",
            "Financial aid counseling prevents 73% of financial dropouts",
            "Mental health support reduces stress-related departures by 65%",
            "Combined interventions are 45% more effective than single approaches",
        ],
    },
];

pub fn find(id: &str) -> Option<&'static InsightReport> {
    REPORTS.iter().find(|report| report.id == id)
}
