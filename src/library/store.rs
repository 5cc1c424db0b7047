//! File-backed pattern library store.

use crate::library::seed::seed_patterns;
use crate::library::types::*;
use crate::slug::slugify;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Keyed collection of structural patterns with best-effort durability.
///
/// The whole library is held in memory and rewritten to a single JSON record
/// on every mutation. Initialization never fails: an unreadable or malformed
/// record falls back to the default seed set, which is persisted immediately.
/// Write failures are logged and swallowed; durability is best-effort, not
/// transactional.
#[derive(Debug)]
pub struct PatternLibrary {
    path: PathBuf,
    patterns: Vec<Pattern>,
}

impl PatternLibrary {
    /// Open the library at the given path, loading the persisted record or
    /// seeding defaults when none is readable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(&path) {
            Some(patterns) => {
                debug!(path = %path.display(), count = patterns.len(), "pattern library loaded");
                Self { path, patterns }
            }
            None => {
                info!(path = %path.display(), "no readable pattern library, seeding defaults");
                let library = Self {
                    path,
                    patterns: seed_patterns(),
                };
                library.persist();
                library
            }
        }
    }

    fn load(path: &Path) -> Option<Vec<Pattern>> {
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<PatternFile>(&raw) {
            Ok(file) => Some(file.patterns),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed pattern library record");
                None
            }
        }
    }

    /// Rewrite the persisted record. Best-effort: failures are logged, never
    /// surfaced. The record is written to a sibling temp file and renamed
    /// into place so a crash cannot leave a torn record.
    fn persist(&self) {
        let file = PatternFile {
            patterns: self.patterns.clone(),
            last_updated: Utc::now(),
        };

        let serialized = match serde_json::to_string_pretty(&file) {
            Ok(s) => s,
            Err(err) => {
                warn!(error = %err, "failed to serialize pattern library");
                return;
            }
        };

        let tmp = self.path.with_extension("tmp");
        if let Err(err) = fs::write(&tmp, serialized).and_then(|_| fs::rename(&tmp, &self.path)) {
            warn!(path = %self.path.display(), error = %err, "failed to persist pattern library");
        }
    }

    /// All stored patterns, in storage order.
    pub fn all(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Get a pattern by id.
    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Patterns whose source domain contains the given substring,
    /// case-insensitively.
    pub fn by_domain(&self, domain: &str) -> Vec<&Pattern> {
        let needle = domain.to_lowercase();
        self.patterns
            .iter()
            .filter(|p| p.source_domain.to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive substring search over domain, structure, features,
    /// and problems. Union of hits, unranked.
    pub fn search(&self, keyword: &str) -> Vec<&Pattern> {
        let needle = keyword.to_lowercase();
        self.patterns
            .iter()
            .filter(|p| {
                p.source_domain.to_lowercase().contains(&needle)
                    || p.abstract_structure.to_lowercase().contains(&needle)
                    || p.key_features.iter().any(|f| f.to_lowercase().contains(&needle))
                    || p.common_problems.iter().any(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Add a caller-submitted pattern. The id is a slug of the source domain
    /// and creation time; usage starts at zero. Persists before returning.
    pub fn add(&mut self, new: NewPattern) -> String {
        let created = Utc::now();
        let id = slugify(&format!(
            "{} {}",
            new.source_domain,
            created.timestamp_millis()
        ));

        self.patterns.push(Pattern {
            id: id.clone(),
            source_domain: new.source_domain,
            abstract_structure: new.abstract_structure,
            key_features: new.key_features,
            common_problems: new.common_problems,
            typical_solutions: new.typical_solutions,
            relationships: new.relationships,
            created,
            usage_count: 0,
        });

        self.persist();
        id
    }

    /// Reinforce a pattern: increment its usage counter and persist.
    ///
    /// Returns whether the pattern was found; an unknown id is a no-op, not
    /// an error.
    pub fn strengthen(&mut self, id: &str) -> bool {
        let Some(pattern) = self.patterns.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        pattern.usage_count += 1;
        debug!(pattern = %id, usage = pattern.usage_count, "pattern reinforced");
        self.persist();
        true
    }

    /// Aggregate statistics: total count, top five by usage, distinct
    /// domains.
    pub fn stats(&self) -> LibraryStats {
        let mut by_usage: Vec<&Pattern> = self.patterns.iter().collect();
        by_usage.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));

        let mut domains: Vec<String> = Vec::new();
        for p in &self.patterns {
            if !domains.contains(&p.source_domain) {
                domains.push(p.source_domain.clone());
            }
        }

        LibraryStats {
            total: self.patterns.len(),
            top_used: by_usage
                .into_iter()
                .take(5)
                .map(|p| PatternUsage {
                    id: p.id.clone(),
                    source_domain: p.source_domain.clone(),
                    usage_count: p.usage_count,
                })
                .collect(),
            domains,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_library() -> (TempDir, PatternLibrary) {
        let dir = TempDir::new().unwrap();
        let library = PatternLibrary::open(dir.path().join("patterns.json"));
        (dir, library)
    }

    #[test]
    fn test_open_seeds_when_file_is_absent() {
        let (_dir, library) = temp_library();
        assert_eq!(library.all().len(), 6);
        assert!(library.get("restaurant_kitchen").is_some());
    }

    #[test]
    fn test_open_persists_the_seed_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patterns.json");
        let _library = PatternLibrary::open(&path);
        assert!(path.exists());
    }

    #[test]
    fn test_open_falls_back_on_malformed_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patterns.json");
        fs::write(&path, "{ this is not json").unwrap();

        let library = PatternLibrary::open(&path);
        assert_eq!(library.all().len(), 6);
    }

    #[test]
    fn test_round_trip_preserves_ids_and_usage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patterns.json");

        let mut library = PatternLibrary::open(&path);
        library.strengthen("ant_colony");
        library.strengthen("ant_colony");
        let before: Vec<(String, u64)> = library
            .all()
            .iter()
            .map(|p| (p.id.clone(), p.usage_count))
            .collect();

        let reloaded = PatternLibrary::open(&path);
        let after: Vec<(String, u64)> = reloaded
            .all()
            .iter()
            .map(|p| (p.id.clone(), p.usage_count))
            .collect();

        assert_eq!(before, after);
        assert_eq!(reloaded.get("ant_colony").unwrap().usage_count, 2);
    }

    #[test]
    fn test_strengthen_unknown_id_is_noop() {
        let (_dir, mut library) = temp_library();
        assert!(!library.strengthen("no_such_pattern"));
        assert!(library.all().iter().all(|p| p.usage_count == 0));
    }

    #[test]
    fn test_add_assigns_slug_id_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patterns.json");
        let mut library = PatternLibrary::open(&path);

        let id = library.add(
            NewPattern::new("Beehive Foraging", "Scouts advertise sites, workers vote with visits")
                .with_feature("Scouts dance to advertise discovered sites")
                .with_problem("Split decisions between two equal sites")
                .with_solution("Quorum sensing settles the choice"),
        );

        assert!(id.starts_with("beehive_foraging_"));
        assert_eq!(library.get(&id).unwrap().usage_count, 0);

        let reloaded = PatternLibrary::open(&path);
        assert!(reloaded.get(&id).is_some());
    }

    #[test]
    fn test_by_domain_is_case_insensitive_substring() {
        let (_dir, library) = temp_library();
        let hits = library.by_domain("KITCHEN");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_domain, "restaurant_kitchen");
    }

    #[test]
    fn test_search_unions_across_fields() {
        let (_dir, library) = temp_library();

        // "queue" appears in features/structure of several seeds.
        let by_feature = library.search("queue");
        assert!(!by_feature.is_empty());

        // "duplicate" only appears in restaurant_kitchen problems.
        let by_problem = library.search("duplicate");
        assert_eq!(by_problem.len(), 1);
        assert_eq!(by_problem[0].id, "restaurant_kitchen");

        assert!(library.search("zx_no_such_term").is_empty());
    }

    #[test]
    fn test_stats_reports_top_used_and_domains() {
        let (_dir, mut library) = temp_library();
        library.strengthen("postal_sorting");
        library.strengthen("postal_sorting");
        library.strengthen("immune_response");

        let stats = library.stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.top_used.len(), 5);
        assert_eq!(stats.top_used[0].id, "postal_sorting");
        assert_eq!(stats.top_used[0].usage_count, 2);
        assert_eq!(stats.domains.len(), 6);
    }
}
