use std::collections::HashSet;

/// Construction and drafting abbreviations accepted as-is.
const DEFAULT_TERMS: &[&str] = &[
    "abv", "acous", "addl", "adj", "aff", "agg", "alum", "approx", "arch", "assy", "bd", "bldg",
    "blkg", "bm", "bot", "brg", "bsmt", "cab", "cer", "clg", "clr", "cmu", "col", "conc", "const",
    "cont", "corr", "ctr", "det", "dia", "dim", "dn", "dwg", "dwgs", "elec", "elev", "encl", "eq",
    "equip", "exp", "ext", "fdn", "fin", "flr", "ftg", "galv", "gyp", "gwb", "hdwd", "hm", "horiz",
    "hvac", "insul", "int", "jt", "lam", "lav", "max", "mech", "mfr", "min", "misc", "mtl", "nom",
    "osb", "opng", "pl", "plywd", "ptd", "pvc", "reinf", "reqd", "rm", "sched", "sht", "sim",
    "spec", "specs", "sq", "ss", "std", "stl", "struct", "susp", "thk", "tmpd", "typ", "unfin",
    "vct", "vert", "vif", "wd", "wp", "wwf",
];

#[derive(Debug, Clone)]
pub struct TechnicalTerms {
    terms: HashSet<String>,
}

impl Default for TechnicalTerms {
    fn default() -> Self {
        Self {
            terms: DEFAULT_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl TechnicalTerms {
    pub fn empty() -> Self {
        Self {
            terms: HashSet::new(),
        }
    }

    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms = Self::default();
        terms.extend(extra);
        terms
    }

    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms.extend(
            extra
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty()),
        );
    }

    pub fn contains(&self, word: &str) -> bool {
        self.terms.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
