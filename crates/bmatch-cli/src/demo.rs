//! Social meetup example: pair people up for meetings, preferring pairs
//! from different groups and pairs that have not met recently.

use bmatch::{
    Edge, InclusiveReport, MatchingConfig, MatchingError, Weights, check_inclusive,
    inclusive_matching_with,
};
use bmatch_core::Solver;

#[derive(Debug, Clone, Copy)]
pub struct Person {
    pub name: &'static str,
    pub group: &'static str,
    pub max_meetings: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct PreviousMeeting {
    pub person1: &'static str,
    pub person2: &'static str,
    pub recency_weeks: f64,
}

pub const PEOPLE: [Person; 6] = [
    Person {
        name: "Ahmed",
        group: "LA",
        max_meetings: 1,
    },
    Person {
        name: "Barbara",
        group: "LA",
        max_meetings: 1,
    },
    Person {
        name: "Coco",
        group: "NY",
        max_meetings: 1,
    },
    Person {
        name: "David",
        group: "LA",
        max_meetings: 2,
    },
    Person {
        name: "Elizabeth",
        group: "NY",
        max_meetings: 1,
    },
    Person {
        name: "Francois",
        group: "NY",
        max_meetings: 2,
    },
];

pub const PREVIOUS_MEETINGS: [PreviousMeeting; 5] = [
    PreviousMeeting {
        person1: "Ahmed",
        person2: "Coco",
        recency_weeks: 2.0,
    },
    PreviousMeeting {
        person1: "David",
        person2: "Elizabeth",
        recency_weeks: 1.0,
    },
    PreviousMeeting {
        person1: "Ahmed",
        person2: "David",
        recency_weeks: 3.0,
    },
    PreviousMeeting {
        person1: "Barbara",
        person2: "Francois",
        recency_weeks: 4.0,
    },
    PreviousMeeting {
        person1: "Coco",
        person2: "Francois",
        recency_weeks: 2.0,
    },
];

/// Weeks since `a` and `b` last met, in either order.
fn last_met(meetings: &[PreviousMeeting], a: &str, b: &str) -> Option<f64> {
    meetings
        .iter()
        .find(|m| (m.person1 == a && m.person2 == b) || (m.person1 == b && m.person2 == a))
        .map(|m| m.recency_weeks)
}

/// Score every pair: 1.0, halved within a group, and scaled by
/// `1 - 2^-recency` when the pair met before.
pub fn meeting_weights(people: &[Person], meetings: &[PreviousMeeting]) -> Weights {
    let mut weights = Weights::new();
    for (i, first) in people.iter().enumerate() {
        for (j, second) in people.iter().enumerate().skip(i + 1) {
            let mut weight = 1.0;
            if first.group == second.group {
                weight *= 0.5;
            }
            if let Some(recency) = last_met(meetings, first.name, second.name) {
                weight *= 1.0 - 2f64.powf(-recency);
            }
            weights.insert((i, j), weight);
        }
    }
    weights
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutcome {
    pub pairs: Vec<Edge>,
    pub report: InclusiveReport,
}

/// Run inclusive matching on the built-in people.
pub fn run_demo<S>(solver: &mut S, config: &MatchingConfig) -> Result<DemoOutcome, MatchingError>
where
    S: Solver + ?Sized,
{
    let weights = meeting_weights(&PEOPLE, &PREVIOUS_MEETINGS);
    let b_maxs: Vec<u32> = PEOPLE.iter().map(|person| person.max_meetings).collect();

    let pairs = inclusive_matching_with(solver, &b_maxs, &weights, config)?;
    let report = check_inclusive(&b_maxs, &pairs)?;
    Ok(DemoOutcome { pairs, report })
}

/// Human-readable description of the outcome, one line per entry.
pub fn render(outcome: &DemoOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    for &(i, j) in &outcome.pairs {
        let (first, second) = (PEOPLE[i], PEOPLE[j]);
        lines.push(format!(
            "{} in {} meets with {} in {}",
            first.name, first.group, second.name, second.group
        ));
        match last_met(&PREVIOUS_MEETINGS, first.name, second.name) {
            Some(recency) => lines.push(format!("They last met {} weeks ago.", recency)),
            None => lines.push("They haven't met before.".to_string()),
        }
        lines.push(String::new());
    }

    if outcome.report.deficient_nodes.is_empty() {
        lines.push("Every person was assigned their maximum number of meetings.".to_string());
    } else {
        for &node in &outcome.report.deficient_nodes {
            lines.push(format!(
                "{} was not assigned their maximum number of meetings.",
                PEOPLE[node].name
            ));
        }
    }
    if !outcome.report.success {
        lines.push("The meetings are not inclusive.".to_string());
    }
    lines
}
