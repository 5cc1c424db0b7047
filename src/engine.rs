//! Analogy orchestration: the top-level retrieval loop.
//!
//! A synthesize call runs the whole pipeline:
//! 1. EXTRACT: build the structural signature of the problem text
//! 2. SCORE: score every candidate pattern against the signature
//! 3. RANK: sort descending by confidence, truncate to the result cap
//! 4. ELABORATE: term mappings and insights for each ranked candidate
//! 5. REINFORCE: strengthen the winning pattern when confidence clears
//!    the threshold

use crate::extract::{extract_structure, StructuralSignature};
use crate::insight::{suggested_approach, term_mappings, transferable_insights, TermMapping};
use crate::library::PatternLibrary;
use crate::scoring::{score, AbstractionLevel};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Confidence a best match must exceed for reinforcement to fire.
pub const REINFORCE_THRESHOLD: f64 = 0.6;
/// Bounds on the requested result count.
pub const MIN_RESULTS: usize = 1;
pub const MAX_RESULTS: usize = 10;

/// One ranked analogy candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analogy {
    /// Id of the matched pattern
    pub pattern_id: String,
    /// Source domain of the matched pattern
    pub source_domain: String,
    /// The pattern's structural description
    pub structural_match: String,
    /// Source→target term mappings
    pub mapping: Vec<TermMapping>,
    /// Insights translated into the problem's terms
    pub transferable_insights: Vec<String>,
    /// Similarity confidence in [0, 1], abstraction-adjusted
    pub confidence: f64,
}

/// The selected best analogy with a synthesized approach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestAnalogy {
    /// Source domain, or "none" when nothing qualified
    pub domain: String,
    /// Why this pattern was selected
    pub rationale: String,
    /// Actionable recommended approach
    pub suggested_approach: String,
    /// Confidence of the selection, 0.0 when nothing qualified
    pub confidence: f64,
}

impl BestAnalogy {
    /// Placeholder returned when no pattern qualifies. Never an error.
    fn no_match() -> Self {
        Self {
            domain: "none".to_string(),
            rationale: "No stored pattern matched the problem structure".to_string(),
            suggested_approach:
                "No close analogy found; consider adding a pattern for this domain".to_string(),
            confidence: 0.0,
        }
    }
}

/// Full result of one synthesize call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    /// Signature extracted from the problem text
    pub extracted_structure: StructuralSignature,
    /// Ranked analogies, best first, at most `max_results`
    pub analogies: Vec<Analogy>,
    /// The selected best analogy, or the no-match placeholder
    pub best_analogy: BestAnalogy,
}

/// Top-level analogy engine.
///
/// Owns the pattern library so that winning retrievals can reinforce it.
/// Construct one per process (or per test) and pass it by reference; there
/// is no global instance.
#[derive(Debug)]
pub struct AnalogyEngine {
    library: PatternLibrary,
}

impl AnalogyEngine {
    /// Create an engine over an opened pattern library.
    pub fn new(library: PatternLibrary) -> Self {
        Self { library }
    }

    /// Read access to the underlying library.
    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Mutable access to the underlying library, for callers that add or
    /// strengthen patterns directly.
    pub fn library_mut(&mut self) -> &mut PatternLibrary {
        &mut self.library
    }

    /// Retrieve the patterns most analogous to a problem statement.
    ///
    /// `domain_filter` restricts candidates to patterns whose source domain
    /// contains one of the given substrings. `max_results` is clamped to
    /// 1..=10. When the best match's confidence exceeds
    /// [`REINFORCE_THRESHOLD`], its pattern is strengthened in the library:
    /// retrieval that proves useful makes itself more durable.
    pub fn synthesize(
        &mut self,
        problem: &str,
        domain_filter: Option<&[String]>,
        level: AbstractionLevel,
        max_results: usize,
    ) -> Synthesis {
        let signature = extract_structure(problem);
        let cap = max_results.clamp(MIN_RESULTS, MAX_RESULTS);

        let mut analogies: Vec<Analogy> = self
            .library
            .all()
            .iter()
            .filter(|pattern| match domain_filter {
                Some(domains) => {
                    let domain = pattern.source_domain.to_lowercase();
                    domains.iter().any(|d| domain.contains(&d.to_lowercase()))
                }
                None => true,
            })
            .map(|pattern| Analogy {
                pattern_id: pattern.id.clone(),
                source_domain: pattern.source_domain.clone(),
                structural_match: pattern.abstract_structure.clone(),
                mapping: term_mappings(pattern, problem),
                transferable_insights: transferable_insights(pattern, problem),
                confidence: score(&signature, pattern, level),
            })
            .collect();

        // Stable sort: equal confidences keep library storage order.
        analogies.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        analogies.truncate(cap);

        let best_analogy = match analogies
            .first()
            .and_then(|best| self.library.get(&best.pattern_id).map(|p| (best, p)))
        {
            Some((best, pattern)) => {
                let approach =
                    suggested_approach(pattern, &best.transferable_insights, problem);
                BestAnalogy {
                    domain: best.source_domain.clone(),
                    rationale: format!(
                        "{} shares the most structure with the stated problem (confidence {:.2})",
                        best.source_domain, best.confidence
                    ),
                    suggested_approach: approach,
                    confidence: best.confidence,
                }
            }
            None => BestAnalogy::no_match(),
        };

        if best_analogy.confidence > REINFORCE_THRESHOLD {
            let winner = &analogies[0].pattern_id;
            debug!(pattern = %winner, confidence = best_analogy.confidence, "reinforcing best analogy");
            self.library.strengthen(winner);
        }

        Synthesis {
            extracted_structure: signature,
            analogies,
            best_analogy,
        }
    }
}
