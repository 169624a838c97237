use std::fmt;

/// Part-of-speech label assigned by the POS oracle.
///
/// Labels follow the Penn Treebank tag set (`NN`, `NNS`, `NNP`, `VBZ`, ...),
/// but any string is accepted and carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PosTag(String);

impl PosTag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Noun categories all start with `N` (`NN`, `NNS`, `NNP`, `NNPS`).
    pub fn is_noun(&self) -> bool {
        self.0.starts_with('N')
    }

    pub fn is_proper_noun(&self) -> bool {
        self.0.starts_with("NNP")
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
