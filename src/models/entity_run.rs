use std::fmt;

/// Entity classification attached to a token by the NER oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Entity,
    NonEntity,
}

impl EntityClass {
    /// Label the NER backend uses for tokens outside any entity.
    pub const OUTSIDE_LABEL: &'static str = "O";

    /// Maps a raw NER label to a classification.
    ///
    /// Only the outside label (`"O"`, any case) is non-entity; every other
    /// label, including ones we have never seen, counts as an entity.
    ///
    /// # Examples
    ///
    /// ```
    /// use aska::models::EntityClass;
    ///
    /// assert_eq!(EntityClass::from_label("O"), EntityClass::NonEntity);
    /// assert_eq!(EntityClass::from_label("LOCATION"), EntityClass::Entity);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(Self::OUTSIDE_LABEL) {
            Self::NonEntity
        } else {
            Self::Entity
        }
    }

    pub fn is_entity(self) -> bool {
        matches!(self, Self::Entity)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => write!(f, "entity"),
            Self::NonEntity => write!(f, "non-entity"),
        }
    }
}

/// A maximal contiguous group of query tokens sharing one entity class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRun {
    tokens: Vec<String>,
    class: EntityClass,
    start: usize,
}

impl EntityRun {
    /// `start` is the query position of the run's first token.
    pub fn new(tokens: Vec<String>, class: EntityClass, start: usize) -> Self {
        Self {
            tokens,
            class,
            start,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn class(&self) -> EntityClass {
        self.class
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Single-token runs skip phrase decomposition entirely.
    pub fn is_singleton(&self) -> bool {
        self.tokens.len() == 1
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}
