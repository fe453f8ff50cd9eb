use crate::iupac_code::IupacCode;
use serde::{Deserialize, Serialize};

/// One catalog record: name, recognition site (degenerate-base aware) and
/// the cut offset into the site. The compiled site pattern is derived once
/// at load time, not per search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RestrictionEnzyme {
    pub name: String,
    pub sequence: String,
    pub note: Option<String>,
    pub cut: isize,
    #[serde(skip)]
    site_pattern: Vec<IupacCode>,
}

impl RestrictionEnzyme {
    pub fn new(name: &str, sequence: &str, cut: isize) -> Self {
        let mut ret = Self {
            name: name.to_string(),
            sequence: sequence.to_string(),
            note: None,
            cut,
            site_pattern: vec![],
        };
        ret.compile_site();
        ret
    }

    pub fn compile_site(&mut self) {
        self.site_pattern = self
            .sequence
            .bytes()
            .map(IupacCode::from_letter)
            .collect();
    }

    /// All 0-based match start positions of the recognition site in `seq`,
    /// overlapping occurrences included, ascending order.
    pub fn search(&self, seq: &[u8]) -> Vec<usize> {
        let window = self.site_pattern.len();
        if window == 0 || seq.len() < window {
            return vec![];
        }
        (0..=seq.len() - window)
            .filter(|&start| {
                self.site_pattern
                    .iter()
                    .zip(&seq[start..start + window])
                    .all(|(code, &base)| code.intersects(IupacCode::from_letter(base)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_single_site() {
        let re = RestrictionEnzyme::new("EcoRI", "GAATTC", 1);
        assert_eq!(re.search(b"GAATTC"), vec![0]);
        assert_eq!(re.search(b"TTGAATTCTT"), vec![2]);
        assert_eq!(re.search(b"TTTTTT"), Vec::<usize>::new());
    }

    #[test]
    fn test_search_multiple_sites() {
        let re = RestrictionEnzyme::new("EcoRI", "GAATTC", 1);
        assert_eq!(re.search(b"GAATTCGAATTC"), vec![0, 6]);
    }

    #[test]
    fn test_search_overlapping_sites() {
        let re = RestrictionEnzyme::new("HhaI", "GCGC", 3);
        // Palindromic 4-mer occurring at two overlapping offsets
        assert_eq!(re.search(b"GCGCGC"), vec![0, 2]);
    }

    #[test]
    fn test_search_degenerate_site() {
        // HinfI: GANTC, N matching any base
        let re = RestrictionEnzyme::new("HinfI", "GANTC", 1);
        assert_eq!(re.search(b"GAATC"), vec![0]);
        assert_eq!(re.search(b"GACTC"), vec![0]);
        assert_eq!(re.search(b"GAGTC"), vec![0]);
        assert_eq!(re.search(b"GATTC"), vec![0]);
        assert_eq!(re.search(b"GTATC"), Vec::<usize>::new());

        // AvaI: CYCGRG
        let re = RestrictionEnzyme::new("AvaI", "CYCGRG", 1);
        assert_eq!(re.search(b"CCCGGG"), vec![0]);
        assert_eq!(re.search(b"CTCGAG"), vec![0]);
        assert_eq!(re.search(b"CACGAG"), Vec::<usize>::new());
    }

    #[test]
    fn test_search_short_sequence() {
        let re = RestrictionEnzyme::new("NotI", "GCGGCCGC", 2);
        assert_eq!(re.search(b"GCGG"), Vec::<usize>::new());
        assert_eq!(re.search(b""), Vec::<usize>::new());
    }
}
