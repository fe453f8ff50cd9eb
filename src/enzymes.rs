use crate::{nucleic_sequence::NucleicSequence, restriction_enzyme::RestrictionEnzyme};
use anyhow::{Result, anyhow};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

const BUILTIN_ENZYMES_JSON: &str = include_str!("../assets/enzymes.json");

/// The injected, read-only enzyme catalog.
#[derive(Clone, Debug)]
pub struct Enzymes {
    restriction_enzymes: Vec<RestrictionEnzyme>,
}

/// All matches of one enzyme against one sequence. Positions are 1-based,
/// ORIGIN-style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteHit {
    pub name: String,
    pub site: String,
    pub positions: Vec<usize>,
}

impl fmt::Display for SiteHit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.name,
            self.site,
            self.positions.iter().join(", ")
        )
    }
}

impl Enzymes {
    fn new(json_text: &str) -> Result<Self> {
        let res: serde_json::Value = serde_json::from_str(json_text)?;
        let arr = res
            .as_array()
            .ok_or(anyhow!("Enzymes file is not a JSON array"))?;
        let mut restriction_enzymes = vec![];
        for row in arr {
            let mut re: RestrictionEnzyme = match serde_json::from_str(&row.to_string()) {
                Ok(re) => re,
                Err(e) => {
                    eprintln!("Bad restriction enzyme: {row}: {e}");
                    continue;
                }
            };
            re.compile_site();
            restriction_enzymes.push(re);
        }
        Ok(Self {
            restriction_enzymes,
        })
    }

    pub fn from_json_text(json_text: &str) -> Result<Self> {
        Self::new(json_text)
    }

    pub fn restriction_enzymes(&self) -> &Vec<RestrictionEnzyme> {
        &self.restriction_enzymes
    }

    /// Catalog subset whose names contain at least one of the filter
    /// substrings, case-insensitively. An empty filter set selects the whole
    /// catalog. Catalog order is preserved.
    pub fn filtered(&self, name_filters: &[String]) -> Vec<&RestrictionEnzyme> {
        let filters: Vec<String> = name_filters
            .iter()
            .map(|f| f.trim().to_uppercase())
            .filter(|f| !f.is_empty())
            .collect();
        self.restriction_enzymes
            .iter()
            .filter(|re| {
                filters.is_empty() || {
                    let name = re.name.to_uppercase();
                    filters.iter().any(|f| name.contains(f))
                }
            })
            .collect()
    }

    /// Scans the sequence against the (filtered) catalog. Enzymes with no
    /// match are omitted; within an enzyme, positions ascend. Pure function
    /// of (sequence, catalog, filters), safe to re-run per keystroke.
    pub fn scan(&self, seq: &NucleicSequence, name_filters: &[String]) -> Vec<SiteHit> {
        self.filtered(name_filters)
            .par_iter()
            .filter_map(|re| {
                let positions: Vec<usize> =
                    re.search(seq.as_bytes()).iter().map(|p| p + 1).collect();
                if positions.is_empty() {
                    None
                } else {
                    Some(SiteHit {
                        name: re.name.clone(),
                        site: re.sequence.clone(),
                        positions,
                    })
                }
            })
            .collect()
    }
}

impl Default for Enzymes {
    fn default() -> Self {
        Enzymes::new(BUILTIN_ENZYMES_JSON).expect("Builtin enzyme catalog is not valid JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(raw: &str) -> NucleicSequence {
        NucleicSequence::normalize(raw).0
    }

    #[test]
    fn test_builtin_catalog() {
        let enzymes = Enzymes::default();
        assert!(
            enzymes
                .restriction_enzymes
                .iter()
                .any(|e| e.name == "EcoRI")
        );
        assert!(
            enzymes
                .restriction_enzymes
                .iter()
                .any(|e| e.name == "BamHI")
        );
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let enzymes =
            Enzymes::from_json_text(r#"[{"name":"EcoRI","sequence":"GAATTC","cut":1},{"oops":1}]"#)
                .unwrap();
        assert_eq!(enzymes.restriction_enzymes().len(), 1);
        assert!(Enzymes::from_json_text("{}").is_err());
    }

    #[test]
    fn test_scan_positions_are_one_based() {
        let enzymes = Enzymes::default();
        let hits = enzymes.scan(&seq("TTGAATTCTT"), &["EcoRI".to_string()]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "EcoRI");
        assert_eq!(hits[0].site, "GAATTC");
        assert_eq!(hits[0].positions, vec![3]);
    }

    #[test]
    fn test_scan_overlapping_hits() {
        let enzymes = Enzymes::default();
        let hits = enzymes.scan(&seq("GCGCGC"), &["HhaI".to_string()]);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].positions, vec![1, 3]);
    }

    #[test]
    fn test_scan_name_filters_or_semantics() {
        let enzymes = Enzymes::default();
        let sequence = seq("GAATTCGGATCCAAGCTT");
        let filters = vec!["ecori".to_string(), "BAMHI".to_string()];
        let hits = enzymes.scan(&sequence, &filters);
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["BamHI", "EcoRI"]);

        // Empty filter list returns every enzyme with at least one hit
        let all_hits = enzymes.scan(&sequence, &[]);
        assert!(all_hits.len() >= hits.len());
        assert!(all_hits.iter().any(|h| h.name == "HindIII"));
    }

    #[test]
    fn test_scan_omits_enzymes_without_hits() {
        let enzymes = Enzymes::default();
        let hits = enzymes.scan(&seq("GAATTC"), &[]);
        assert!(hits.iter().all(|h| !h.positions.is_empty()));
        assert!(!hits.iter().any(|h| h.name == "NotI"));
    }

    #[test]
    fn test_scan_preserves_catalog_order() {
        let enzymes = Enzymes::from_json_text(
            r#"[{"name":"ZFirst","sequence":"GATC","cut":0},
                {"name":"ASecond","sequence":"ATC","cut":0}]"#,
        )
        .unwrap();
        let hits = enzymes.scan(&seq("GATC"), &[]);
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["ZFirst", "ASecond"]);
    }

    #[test]
    fn test_scan_empty_sequence() {
        let enzymes = Enzymes::default();
        assert!(enzymes.scan(&seq(""), &[]).is_empty());
    }

    #[test]
    fn test_site_hit_display() {
        let hit = SiteHit {
            name: "EcoRI".to_string(),
            site: "GAATTC".to_string(),
            positions: vec![3, 17],
        };
        assert_eq!(hit.to_string(), "EcoRI (GAATTC): 3, 17");
    }
}
