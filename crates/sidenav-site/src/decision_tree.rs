//! Partner product wizard.
//!
//! A decision tree of question steps and result steps. The first step is the
//! entry point; every choice names the id of the step it leads to.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

/// One step of the wizard.
///
/// A question step has `options`; a result step has `result` (HTML).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique step id.
    pub id: String,
    /// Heading shown for the step.
    pub title: String,
    /// Question asked on a question step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Answers on a question step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Choice>,
    /// Recommendation shown on a result step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// An answer leading to another step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Answer label.
    pub text: String,
    /// Id of the step this answer leads to.
    pub next_step: String,
}

impl Step {
    fn question(id: &str, title: &str, question: &str, options: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            question: Some(question.to_owned()),
            options: options
                .iter()
                .map(|(text, next_step)| Choice {
                    text: (*text).to_owned(),
                    next_step: (*next_step).to_owned(),
                })
                .collect(),
            result: None,
        }
    }

    fn result(id: &str, title: &str, result: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            question: None,
            options: Vec::new(),
            result: Some(result.to_owned()),
        }
    }
}

/// Structural problem found in a decision tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecisionTreeIssue {
    /// The tree has no steps.
    #[error("decision tree has no steps")]
    Empty,
    /// Two steps share an id.
    #[error("duplicate step id '{0}'")]
    DuplicateId(String),
    /// A choice points at a step that does not exist.
    #[error("step '{step}' links to unknown step '{target}'")]
    UnknownTarget {
        /// Step holding the choice.
        step: String,
        /// Missing target id.
        target: String,
    },
    /// A step has neither options nor a result.
    #[error("step '{0}' has neither options nor a result")]
    DeadEnd(String),
    /// A step has both options and a result.
    #[error("step '{0}' has both options and a result")]
    Ambiguous(String),
    /// A step cannot be reached from the first step.
    #[error("step '{0}' is unreachable from the first step")]
    Unreachable(String),
}

/// Check a decision tree for structural problems.
///
/// # Errors
///
/// Returns every issue found, in step order.
pub fn validate_decision_tree(steps: &[Step]) -> Result<(), Vec<DecisionTreeIssue>> {
    let Some(first) = steps.first() else {
        return Err(vec![DecisionTreeIssue::Empty]);
    };

    let mut issues = Vec::new();
    let mut by_id: HashMap<&str, &Step> = HashMap::new();
    for step in steps {
        if by_id.insert(step.id.as_str(), step).is_some() {
            issues.push(DecisionTreeIssue::DuplicateId(step.id.clone()));
        }
    }

    for step in steps {
        match (step.options.is_empty(), step.result.is_some()) {
            (true, false) => issues.push(DecisionTreeIssue::DeadEnd(step.id.clone())),
            (false, true) => issues.push(DecisionTreeIssue::Ambiguous(step.id.clone())),
            _ => {}
        }
        for choice in &step.options {
            if !by_id.contains_key(choice.next_step.as_str()) {
                issues.push(DecisionTreeIssue::UnknownTarget {
                    step: step.id.clone(),
                    target: choice.next_step.clone(),
                });
            }
        }
    }

    let mut reached: HashSet<&str> = HashSet::from([first.id.as_str()]);
    let mut queue = VecDeque::from([first]);
    while let Some(step) = queue.pop_front() {
        for choice in &step.options {
            if let Some(next) = by_id.get(choice.next_step.as_str())
                && reached.insert(next.id.as_str())
            {
                queue.push_back(next);
            }
        }
    }
    let mut reported = HashSet::new();
    for step in steps {
        if !reached.contains(step.id.as_str()) && reported.insert(step.id.as_str()) {
            issues.push(DecisionTreeIssue::Unreachable(step.id.clone()));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// The partner onboarding wizard.
#[must_use]
pub fn partner_decision_tree() -> Vec<Step> {
    vec![
        Step::question(
            "start",
            "Balancer Tech Product Wizard 🧙‍♂️",
            "What describes best your current product needs / primary use-case?",
            &[
                (
                    "Deployment of correlated / yield-bearing asset liquidity",
                    "step1",
                ),
                ("Hosting of primary liquidity for governance tokens", "resultD"),
                ("Hosting of an index-fund like product", "resultC"),
                ("Building pools with custom execution logic", "resultE"),
                ("Providing liquidity for LVR protection", "resultF"),
                ("Deployment of stable coin liquidity", "step2"),
            ],
        ),
        Step::question(
            "step1",
            "Step 1",
            "What feature do you need for correlated asset or yield-bearing liquidity?",
            &[
                (
                    "Deep liquidity pool for highly-correlated assets containing 50% yield-bearing tokens",
                    "resultA",
                ),
                (
                    "Deep liquidity for highly correlated assets which do not contain yield-bearing tokens",
                    "resultB",
                ),
            ],
        ),
        Step::question(
            "step2",
            "Step 2",
            "What feature do you need for hosting your stable coin liquidity?",
            &[
                (
                    "Maximizing token utilization with additional yield generation of stable coins",
                    "resultG",
                ),
                ("Customized invariant for highly efficient trading", "resultH"),
            ],
        ),
        Step::result(
            "resultA",
            "Composable Stable Pools",
            r#"A <a href="https://docs.balancer.fi/concepts/pools/composable-stable.html#composable-stable-pools" target="_blank" rel="noopener noreferrer">composable stable pool</a> with a rate provider setup will best suit your needs. Consult <a href="/partner-onboarding/balancer-v2/onboard-yb-token.html" target="_blank" rel="noopener noreferrer">our v2 onboarding guide</a> for more details."#,
        ),
        Step::result(
            "resultB",
            "Composable Stable Pools",
            r#"A <a href="https://docs.balancer.fi/concepts/pools/composable-stable.html#composable-stable-pools" target="_blank" rel="noopener noreferrer">composable stable pool</a> without any special requirements. Use <a href="https://app.balancer.fi/#/ethereum/pool/create" target="_blank" rel="noopener noreferrer">this community tool</a> to create a pool. "#,
        ),
        Step::result(
            "resultC",
            "A multi-token pool",
            r#"A multi-token pool with up to 8 tokens will suit best your needs. <a href="https://app.balancer.fi/#/ethereum/pool/create" target="_blank" rel="noopener noreferrer">Create a pool</a> now!"#,
        ),
        Step::result(
            "resultD",
            "Governance Tokenomics",
            r#"A 80/20 pool based on <a href="/partner-onboarding/onboarding-overview/products/ve8020.html" target="_blank" rel="noopener noreferrer">governance tokenomics</a> might be the best fit for you!"#,
        ),
        Step::result(
            "resultE",
            "Pools with Hooks",
            r#"A Balancer v3 pool with <a href="/concepts/core-concepts/hooks.html" target="_blank" rel="noopener noreferrer">custom hook</a> logic sounds like a perfect fit for your needs. Explore hooks now!"#,
        ),
        Step::result(
            "resultF",
            "CowAMM liquidity pool",
            "A CowAMM liquidity pool based on their custom implementation based on Balancer might be best suited for your needs",
        ),
        Step::result(
            "resultG",
            "Boosted Pools",
            r#"A <a href="/partner-onboarding/onboarding-overview/products/boostedpools.html" target="_blank" rel="noopener noreferrer">boosted pool</a>  on Balancer v3 will guarantee additional yield generation and high utilization rates of stable coin pairings"#,
        ),
        Step::result(
            "resultH",
            "Gyroscope E-CLPs",
            r#"<a href="https://app.gyro.finance/" target="_blank" rel="noopener noreferrer">Gyroscopes</a> elliptical concentrated liquidity pools offer the best trading efficiency for highly correlated assets with customized trading curves."#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn choice(text: &str, next_step: &str) -> Choice {
        Choice {
            text: text.to_owned(),
            next_step: next_step.to_owned(),
        }
    }

    #[test]
    fn test_partner_tree_is_valid() {
        assert_eq!(validate_decision_tree(&partner_decision_tree()), Ok(()));
    }

    #[test]
    fn test_partner_tree_starts_at_start() {
        let tree = partner_decision_tree();
        assert_eq!(tree[0].id, "start");
        assert_eq!(tree.len(), 11);
        let targets: Vec<_> = tree[0].options.iter().map(|c| c.next_step.as_str()).collect();
        assert_eq!(
            targets,
            vec!["step1", "resultD", "resultC", "resultE", "resultF", "step2"]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let steps = vec![
            Step::question("start", "Start", "Which?", &[("Pools", "done")]),
            Step::result("done", "Done", "<b>ok</b>"),
        ];

        assert_eq!(
            serde_json::to_value(&steps).unwrap(),
            json!([
                {
                    "id": "start",
                    "title": "Start",
                    "question": "Which?",
                    "options": [{ "text": "Pools", "nextStep": "done" }]
                },
                { "id": "done", "title": "Done", "result": "<b>ok</b>" }
            ])
        );
    }

    #[test]
    fn test_deserialize_camel_case() {
        let steps: Vec<Step> = serde_json::from_value(json!([
            { "id": "a", "title": "A", "options": [{ "text": "go", "nextStep": "b" }] },
            { "id": "b", "title": "B", "result": "done" }
        ]))
        .unwrap();

        assert_eq!(steps[0].options, vec![choice("go", "b")]);
        assert_eq!(steps[0].question, None);
        assert_eq!(steps[1].result.as_deref(), Some("done"));
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(
            validate_decision_tree(&[]),
            Err(vec![DecisionTreeIssue::Empty])
        );
    }

    #[test]
    fn test_unknown_target() {
        let steps = vec![Step::question("start", "Start", "?", &[("x", "missing")])];

        assert_eq!(
            validate_decision_tree(&steps),
            Err(vec![DecisionTreeIssue::UnknownTarget {
                step: "start".to_owned(),
                target: "missing".to_owned(),
            }])
        );
    }

    #[test]
    fn test_duplicate_id() {
        let steps = vec![
            Step::question("start", "Start", "?", &[("x", "end")]),
            Step::result("end", "End", "a"),
            Step::result("end", "End again", "b"),
        ];

        assert_eq!(
            validate_decision_tree(&steps),
            Err(vec![DecisionTreeIssue::DuplicateId("end".to_owned())])
        );
    }

    #[test]
    fn test_dead_end_and_ambiguous() {
        let mut both = Step::result("both", "Both", "r");
        both.options.push(choice("back", "start"));
        let steps = vec![
            Step::question("start", "Start", "?", &[("x", "empty"), ("y", "both")]),
            Step {
                id: "empty".to_owned(),
                title: "Empty".to_owned(),
                question: None,
                options: Vec::new(),
                result: None,
            },
            both,
        ];

        assert_eq!(
            validate_decision_tree(&steps),
            Err(vec![
                DecisionTreeIssue::DeadEnd("empty".to_owned()),
                DecisionTreeIssue::Ambiguous("both".to_owned()),
            ])
        );
    }

    #[test]
    fn test_unreachable_step() {
        let steps = vec![
            Step::question("start", "Start", "?", &[("x", "end")]),
            Step::result("end", "End", "a"),
            Step::result("orphan", "Orphan", "b"),
        ];

        assert_eq!(
            validate_decision_tree(&steps),
            Err(vec![DecisionTreeIssue::Unreachable("orphan".to_owned())])
        );
    }

    #[test]
    fn test_cycles_are_allowed() {
        let steps = vec![
            Step::question("start", "Start", "?", &[("again", "start"), ("done", "end")]),
            Step::result("end", "End", "a"),
        ];

        assert_eq!(validate_decision_tree(&steps), Ok(()));
    }

    #[test]
    fn test_issue_display() {
        let issue = DecisionTreeIssue::UnknownTarget {
            step: "start".to_owned(),
            target: "nowhere".to_owned(),
        };
        assert_eq!(
            issue.to_string(),
            "step 'start' links to unknown step 'nowhere'"
        );
    }
}
