//! Default seed patterns.
//!
//! Loaded when no persisted library exists or the persisted record cannot be
//! read. The set spans six unrelated source domains so that fresh
//! installations can already answer analogy queries about coordination,
//! routing, contention, and fault handling.

use crate::library::types::{Pattern, PatternRelationship};
use chrono::Utc;

fn pattern(
    id: &str,
    source_domain: &str,
    abstract_structure: &str,
    key_features: &[&str],
    common_problems: &[&str],
    typical_solutions: &[&str],
    relationships: &[(&str, &str)],
) -> Pattern {
    Pattern {
        id: id.to_string(),
        source_domain: source_domain.to_string(),
        abstract_structure: abstract_structure.to_string(),
        key_features: key_features.iter().map(|s| s.to_string()).collect(),
        common_problems: common_problems.iter().map(|s| s.to_string()).collect(),
        typical_solutions: typical_solutions.iter().map(|s| s.to_string()).collect(),
        relationships: relationships
            .iter()
            .map(|(r, t)| PatternRelationship::new(*r, *t))
            .collect(),
        created: Utc::now(),
        usage_count: 0,
    }
}

/// Build the default seed set.
pub fn seed_patterns() -> Vec<Pattern> {
    vec![
        pattern(
            "restaurant_kitchen",
            "restaurant_kitchen",
            "Independent workers pull work from a shared visible queue, sequenced by a central expediter",
            &[
                "Workers claim tasks to avoid duplication",
                "A central expediter sequences outgoing work",
                "Stations specialize and hand off partial results",
            ],
            &[
                "Duplicate work when coordination breaks down",
                "Bottlenecks at one station during rush periods",
                "Stale orders when the queue is not visible to everyone",
            ],
            &[
                "Pull-based claiming: cooks take the next order when free",
                "Expediter batches related work and sequences handoffs",
                "Priority lanes for urgent orders",
            ],
            &[("coordinates_with", "order queue"), ("competes_for", "shared orders")],
        ),
        pattern(
            "ant_colony",
            "ant_colony",
            "Many simple agents follow shared environmental signals that are reinforced by success",
            &[
                "Scouts discover routes and mark them with trails",
                "Workers follow the strongest trail available",
                "Unreinforced trails fade over time",
            ],
            &[
                "Convergence on stale routes after conditions change",
                "Oscillation when competing signals conflict",
            ],
            &[
                "Reinforce successful routes gradually instead of all at once",
                "Publish discoveries through shared markers rather than direct messages",
            ],
            &[("flows_to", "food source"), ("coordinates_with", "pheromone trail")],
        ),
        pattern(
            "postal_sorting",
            "postal_sorting",
            "Items flow through hierarchical hubs where each hop makes a purely local routing decision",
            &[
                "Every item carries its full destination address",
                "Hubs sort by coarse region first, fine region later",
                "Transport between hubs is batched",
            ],
            &[
                "A misrouted item cascades delay through every later hop",
                "Hub overload under seasonal spikes",
            ],
            &[
                "Route with local decisions so no hub needs global knowledge",
                "Batch items by destination before transport",
            ],
            &[("flows_to", "destination region"), ("wait_in", "sorting hub")],
        ),
        pattern(
            "immune_response",
            "immune_response",
            "Distributed detectors sample continuously and escalate a response proportional to the threat signal",
            &[
                "Detectors circulate and sample constantly",
                "Response strength scales with signal strength",
                "Memory cells shortcut the response to repeat threats",
            ],
            &[
                "Overreaction harms the system it protects",
                "The first response to a novel threat is slow",
            ],
            &[
                "Escalate proportionally to the observed signal",
                "Cache successful responses so repeats resolve fast",
            ],
            &[("depends_on", "threat signal"), ("coordinates_with", "memory cells")],
        ),
        pattern(
            "air_traffic_control",
            "air_traffic_control",
            "A central controller sequences exclusive access to a contended resource using timed slots",
            &[
                "A single controller owns the sequencing decision",
                "Arrivals hold in stacked waiting patterns",
                "Each movement is assigned an exclusive slot",
            ],
            &[
                "A missed slot cascades delay across the schedule",
                "Contention peaks exceed resource capacity",
            ],
            &[
                "Slot-based scheduling for the contended resource",
                "Holding queues absorb arrival bursts",
            ],
            &[("competes_for", "runway slot"), ("wait_in", "holding pattern")],
        ),
        pattern(
            "library_circulation",
            "library_circulation",
            "Consumers borrow exclusive time-bounded leases on shared resources, with ordered waiting lists",
            &[
                "A borrowed item is held exclusively until returned",
                "Due dates bound how long a resource can be held",
                "Reservation lists order waiting consumers",
            ],
            &[
                "Popular items starve the readers waiting for them",
                "Lost items are only discovered when someone asks",
            ],
            &[
                "Time-bounded leases force resources back into circulation",
                "Ordered reservation lists make waiting fair and visible",
            ],
            &[("competes_for", "popular titles"), ("wait_in", "reservation list")],
        ),
    ]
}
