/// Risk factor reference material and lifestyle interventions
///
/// The catalog describes each factor the risk assessor scores. Interventions
/// are suggested from the factors a particular assessment raised.

use serde::{Deserialize, Serialize};
use crate::analytics::risk::{FactorKind, RiskAssessment};

/// Reference description of a scored risk factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorInfo {
    pub name: FactorKind,
    pub description: String,
    pub impact: String,
    /// Whether lifestyle changes can move this factor
    pub modifiable: bool,
}

/// Category of a suggested intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    Dietary,
    Lifestyle,
    Exercise,
}

/// How hard an intervention is to stick with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
}

/// A lifestyle change that targets one risk factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub kind: InterventionKind,
    pub name: String,
    pub description: String,
    pub expected_benefit: String,
    pub difficulty: Difficulty,
    pub time_to_effect: String,
    /// Factor this intervention addresses
    pub targets: FactorKind,
}

/// Describe every factor the risk assessor scores, in scoring order
pub fn risk_factor_catalog() -> Vec<RiskFactorInfo> {
    vec![
        RiskFactorInfo {
            name: FactorKind::Age,
            description: "Age is a non-modifiable risk factor".to_string(),
            impact: "Increases risk for most chronic conditions".to_string(),
            modifiable: false,
        },
        RiskFactorInfo {
            name: FactorKind::BloodPressure,
            description: "High blood pressure increases cardiovascular risk".to_string(),
            impact: "Major risk factor for heart disease and stroke".to_string(),
            modifiable: true,
        },
        RiskFactorInfo {
            name: FactorKind::Weight,
            description: "Excess weight increases risk for multiple conditions".to_string(),
            impact: "Increases risk for diabetes, heart disease, and joint problems".to_string(),
            modifiable: true,
        },
        RiskFactorInfo {
            name: FactorKind::Activity,
            description: "Low physical activity increases health risks".to_string(),
            impact: "Increases risk for cardiovascular disease and diabetes".to_string(),
            modifiable: true,
        },
    ]
}

/// Suggest interventions for the modifiable factors an assessment raised
///
/// Any level (medium or high) of a factor qualifies. An assessment with
/// no factors, including an unknown one, gets no suggestions.
pub fn suggest_interventions(assessment: &RiskAssessment) -> Vec<Intervention> {
    let mut interventions = Vec::new();

    if assessment.has_factor(FactorKind::BloodPressure) {
        interventions.push(Intervention {
            kind: InterventionKind::Dietary,
            name: "DASH Diet".to_string(),
            description: "Dietary Approaches to Stop Hypertension".to_string(),
            expected_benefit: "Reduce systolic BP by 5-10 mmHg".to_string(),
            difficulty: Difficulty::Moderate,
            time_to_effect: "2-4 weeks".to_string(),
            targets: FactorKind::BloodPressure,
        });
    }

    if assessment.has_factor(FactorKind::Weight) {
        interventions.push(Intervention {
            kind: InterventionKind::Lifestyle,
            name: "Calorie Restriction".to_string(),
            description: "Moderate calorie reduction for sustainable weight loss".to_string(),
            expected_benefit: "5-10% weight loss over 6 months".to_string(),
            difficulty: Difficulty::Moderate,
            time_to_effect: "4-8 weeks".to_string(),
            targets: FactorKind::Weight,
        });
    }

    if assessment.has_factor(FactorKind::Activity) {
        interventions.push(Intervention {
            kind: InterventionKind::Exercise,
            name: "Progressive Walking Program".to_string(),
            description: "Gradually increase daily walking duration".to_string(),
            expected_benefit: "Improve cardiovascular fitness and reduce disease risk".to_string(),
            difficulty: Difficulty::Easy,
            time_to_effect: "2-3 weeks".to_string(),
            targets: FactorKind::Activity,
        });
    }

    interventions
}
