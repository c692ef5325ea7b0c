use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Normal,
    AlzheimersDisease,
    EarlyMci,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Normal => "Brain Scan Appears Normal",
            Category::AlzheimersDisease => "Alzheimer's Disease Detected",
            Category::EarlyMci => "Early Alzheimer's (Mild Cognitive Impairment)",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::AlzheimersDisease => "alzheimers_disease",
            Category::EarlyMci => "early_mci",
        }
    }
}

pub fn category_order() -> &'static [Category] {
    &[
        Category::Normal,
        Category::EarlyMci,
        Category::AlzheimersDisease,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Benign,
    Concerning,
}

impl Severity {
    pub fn key(self) -> &'static str {
        match self {
            Severity::Benign => "benign",
            Severity::Concerning => "concerning",
        }
    }

    /// Presentation cue name (selects the chime vs. alert sound).
    pub fn cue(self) -> &'static str {
        match self {
            Severity::Benign => "good",
            Severity::Concerning => "bad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub category: Category,
    pub severity: Severity,
}

impl Verdict {
    pub const fn new(category: Category, severity: Severity) -> Self {
        Self { category, severity }
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// Which cascade rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Benign,
    AdvancedRisk,
    EarlyRisk,
    SafetyNet,
}

impl RuleId {
    pub fn key(self) -> &'static str {
        match self {
            RuleId::Benign => "benign",
            RuleId::AdvancedRisk => "advanced_risk",
            RuleId::EarlyRisk => "early_risk",
            RuleId::SafetyNet => "safety_net",
        }
    }
}

pub fn severity_order() -> &'static [Severity] {
    &[Severity::Benign, Severity::Concerning]
}

pub fn rule_order() -> &'static [RuleId] {
    &[
        RuleId::Benign,
        RuleId::AdvancedRisk,
        RuleId::EarlyRisk,
        RuleId::SafetyNet,
    ]
}
