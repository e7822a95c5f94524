use serde::{Deserialize, Serialize};

/// One node of the policy classification tree (policy, measure or basic project)
///
/// Only `id` takes part in matching. `name` is display text and may be
/// spelled differently across records that share an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HierarchyNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl HierarchyNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Project period (continuing / new / ending)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectPeriod {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Financial figures for one fiscal year, in thousands of yen
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct YearlyFinancial {
    pub year: i32,
    pub national_subsidy: f64,
    pub prefectural_subsidy: f64,
    pub local_bond: f64,
    pub other: f64,
    pub general_revenue: f64,
    pub total_cost: f64,
    pub personnel_count: f64,
    pub work_hours: f64,
    pub personnel_cost: f64,
    /// Project cost plus personnel cost
    pub grand_total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationComment {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Evaluation {
    /// Reform / improvement direction
    pub direction: String,
    /// Forward-looking direction (continue, expand, review, ...)
    pub future_direction: String,
    pub comments: Vec<EvaluationComment>,
}

/// A single administrative project with its evaluation sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub created_at: String,

    pub policy: HierarchyNode,
    pub measure: HierarchyNode,
    pub basic_project: HierarchyNode,

    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub contact: String,

    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub period: ProjectPeriod,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub legal_basis: String,

    /// Yearly figures, latest year first
    #[serde(default)]
    pub financials: Vec<YearlyFinancial>,

    #[serde(default)]
    pub evaluation: Evaluation,
}

impl Project {
    /// Text compared by the semantic axis: overview, target and intent
    pub fn similarity_text(&self) -> String {
        format!("{} {} {}", self.overview, self.target, self.intent)
    }

    #[inline]
    pub fn latest_financial(&self) -> Option<&YearlyFinancial> {
        self.financials.first()
    }

    /// Latest-year total cost, `None` when the sheet has no financial rows
    #[inline]
    pub fn latest_total_cost(&self) -> Option<f64> {
        self.latest_financial().map(|f| f.grand_total)
    }
}

/// Top-level shape of the converted `projects.json` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDataset {
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub total_count: usize,
    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_dataset_entry() {
        let value = json!({
            "id": "P001",
            "name": "道路維持管理事業",
            "policy": { "id": "POL1", "name": "安全・安心なまちづくり" },
            "measure": { "id": "MES1", "name": "道路整備" },
            "basicProject": { "id": "BP1", "name": "市道維持管理" },
            "department": "建設部",
            "category": "一般",
            "period": { "type": "継続", "start": "2020" },
            "overview": "市道の舗装補修",
            "target": "市内全域の市道",
            "intent": "安全な道路環境を維持する",
            "financials": [
                { "year": 2024, "totalCost": 50000, "grandTotal": 55000 },
                { "year": 2023, "totalCost": 40000, "grandTotal": 44000 }
            ],
            "indicators": [],
            "evaluation": { "direction": "現状維持", "futureDirection": "現状維持", "comments": [] }
        });

        let project: Project = serde_json::from_value(value).unwrap();
        assert_eq!(project.basic_project.id, "BP1");
        assert_eq!(project.period.kind, "継続");
        assert_eq!(project.latest_total_cost(), Some(55000.0));
        assert_eq!(project.evaluation.future_direction, "現状維持");
    }

    #[test]
    fn test_similarity_text_joins_three_fields() {
        let project = Project {
            overview: "a".into(),
            target: "b".into(),
            intent: "c".into(),
            ..Default::default()
        };
        assert_eq!(project.similarity_text(), "a b c");
    }

    #[test]
    fn test_missing_financials() {
        let project = Project::default();
        assert!(project.latest_financial().is_none());
        assert_eq!(project.latest_total_cost(), None);
    }
}
