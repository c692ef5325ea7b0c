//! Cascade decision engine.
//!
//! The two AD signals are reduced to a verdict by an ordered rule table:
//! the first rule whose predicate holds wins, and the safety net catches
//! every input no rule claims. The safety net resolves to a concerning
//! verdict, so no ambiguous input can end up benign.

use serde::Serialize;

use crate::model::classes::{RefinementVector, ScreeningVector};
use crate::model::thresholds::ThresholdPolicy;
use crate::model::verdict::{Category, RuleId, Severity, Verdict};

/// The two scalars the rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signals {
    pub screening_ad: f32,
    pub refinement_ad: f32,
}

impl Signals {
    pub fn extract(screening: &ScreeningVector, refinement: &RefinementVector) -> Self {
        Self {
            screening_ad: screening.ad(),
            refinement_ad: refinement.ad(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub applies: fn(&Signals, &ThresholdPolicy) -> bool,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub rules: &'static [Rule],
    pub fallback_id: RuleId,
    pub fallback: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub rule: RuleId,
    pub signals: Signals,
}

const NORMAL: Verdict = Verdict::new(Category::Normal, Severity::Benign);
const ADVANCED: Verdict = Verdict::new(Category::AlzheimersDisease, Severity::Concerning);
const EARLY: Verdict = Verdict::new(Category::EarlyMci, Severity::Concerning);

pub const CASCADE: RuleTable = RuleTable {
    rules: &[
        Rule {
            id: RuleId::Benign,
            applies: benign,
            verdict: NORMAL,
        },
        Rule {
            id: RuleId::AdvancedRisk,
            applies: advanced_risk,
            verdict: ADVANCED,
        },
        Rule {
            id: RuleId::EarlyRisk,
            applies: early_risk,
            verdict: EARLY,
        },
    ],
    fallback_id: RuleId::SafetyNet,
    fallback: EARLY,
};

// Both models must agree there is no AD signal.
fn benign(s: &Signals, p: &ThresholdPolicy) -> bool {
    s.refinement_ad <= p.refinement_ad_low() && s.screening_ad <= p.screening_ad_ceiling()
}

fn advanced_risk(s: &Signals, p: &ThresholdPolicy) -> bool {
    s.refinement_ad >= p.refinement_ad_high()
}

fn early_risk(s: &Signals, p: &ThresholdPolicy) -> bool {
    p.refinement_ad_low() < s.refinement_ad && s.refinement_ad < p.refinement_ad_high()
}

impl RuleTable {
    pub fn evaluate(&self, signals: Signals, policy: &ThresholdPolicy) -> Decision {
        for rule in self.rules {
            if (rule.applies)(&signals, policy) {
                return Decision {
                    verdict: rule.verdict,
                    rule: rule.id,
                    signals,
                };
            }
        }
        Decision {
            verdict: self.fallback,
            rule: self.fallback_id,
            signals,
        }
    }
}

/// Verdict for one scan, together with the rule that fired.
pub fn decide(
    screening: &ScreeningVector,
    refinement: &RefinementVector,
    policy: &ThresholdPolicy,
) -> Decision {
    CASCADE.evaluate(Signals::extract(screening, refinement), policy)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_decide.rs"]
mod tests;
