//! Role cards and the read-only pool they are dealt from.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{CardPoolError, RoleType};

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// One themed role card.
///
/// Cards are immutable. The pool owns them behind `Arc`, and a player who is
/// dealt a card holds a clone of that `Arc` rather than a copy of the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique across the whole pool. Role configurations enable cards by name.
    pub name: String,

    /// Which role this card grants.
    pub role_type: RoleType,

    /// Rules text shown to the player holding the card.
    #[serde(default)]
    pub description: String,

    /// Optional flavor text.
    #[serde(default)]
    pub flavor: Option<String>,
}

impl Card {
    /// Creates a card with no description or flavor text.
    pub fn new(name: impl Into<String>, role_type: RoleType) -> Self {
        Self {
            name: name.into(),
            role_type,
            description: String::new(),
            flavor: None,
        }
    }

    /// Sets the rules text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the flavor text.
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }
}

// ---------------------------------------------------------------------------
// CardPool
// ---------------------------------------------------------------------------

/// Every card the server knows about, partitioned by role type.
///
/// Built once at startup and shared by all rooms. There is no way to mutate
/// a pool after construction.
#[derive(Debug, Clone, Default)]
pub struct CardPool {
    leaders: Vec<Arc<Card>>,
    guardians: Vec<Arc<Card>>,
    assassins: Vec<Arc<Card>>,
    traitors: Vec<Arc<Card>>,
}

impl CardPool {
    /// Builds a pool, routing each card into its role type's list.
    ///
    /// # Errors
    /// Returns [`CardPoolError::DuplicateCard`] if two cards share a name.
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Result<Self, CardPoolError> {
        let mut pool = Self::default();
        let mut seen = HashSet::new();

        for card in cards {
            if !seen.insert(card.name.clone()) {
                return Err(CardPoolError::DuplicateCard(card.name));
            }
            pool.list_mut(card.role_type).push(Arc::new(card));
        }

        Ok(pool)
    }

    /// All cards of one role type, in load order.
    pub fn cards(&self, role_type: RoleType) -> &[Arc<Card>] {
        match role_type {
            RoleType::Leader => &self.leaders,
            RoleType::Guardian => &self.guardians,
            RoleType::Assassin => &self.assassins,
            RoleType::Traitor => &self.traitors,
        }
    }

    /// Looks up a card by name across every role type.
    pub fn find(&self, name: &str) -> Option<&Arc<Card>> {
        RoleType::ALL
            .into_iter()
            .flat_map(|role| self.cards(role))
            .find(|card| card.name == name)
    }

    /// Returns `true` if a card with this name exists under `role_type`.
    pub fn contains(&self, role_type: RoleType, name: &str) -> bool {
        self.cards(role_type).iter().any(|card| card.name == name)
    }

    /// Total number of cards across all role types.
    pub fn len(&self) -> usize {
        RoleType::ALL.into_iter().map(|role| self.cards(role).len()).sum()
    }

    /// Returns `true` if the pool holds no cards at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn list_mut(&mut self, role_type: RoleType) -> &mut Vec<Arc<Card>> {
        match role_type {
            RoleType::Leader => &mut self.leaders,
            RoleType::Guardian => &mut self.guardians,
            RoleType::Assassin => &mut self.assassins,
            RoleType::Traitor => &mut self.traitors,
        }
    }
}
