use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardWebhook {
    pub id: String,
}

/// Category of a board list, recognized from the list name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    ToDo,
    Done,
}

impl ListScope {
    fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Self::ToDo => &["to do", "à faire"],
            Self::Done => &["done", "fait"],
        }
    }

    /// Case-insensitive substring match against the synonyms of this scope.
    /// A name can match both scopes, e.g. "Done / To do".
    pub fn matches(&self, list_name: &str) -> bool {
        let name = list_name.to_lowercase();
        self.synonyms().iter().any(|s| name.contains(s))
    }

    pub fn contains(&self, list: Option<&BoardList>) -> bool {
        list.map(|l| self.matches(&l.name)).unwrap_or(false)
    }

    pub fn find_list<'a>(&self, lists: &'a [BoardList]) -> Option<&'a BoardList> {
        lists.iter().find(|l| self.matches(&l.name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardActionKind {
    CreateCard,
    UpdateCard,
    DeleteCard,
    Other(String),
}

impl From<&str> for BoardActionKind {
    fn from(action_type: &str) -> Self {
        match action_type {
            "createCard" => Self::CreateCard,
            "updateCard" => Self::UpdateCard,
            "deleteCard" => Self::DeleteCard,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A raw action reported by the board webhook
#[derive(Debug, Clone, PartialEq)]
pub struct BoardAction {
    pub kind: BoardActionKind,
    pub card: BoardCard,
    /// The list the card is in. For moves this is absent and
    /// `list_before` / `list_after` are set instead.
    pub list: Option<BoardList>,
    pub list_after: Option<BoardList>,
}

/// Board changes that affect `Reminder`s
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    CardCreatedInScopeList(BoardCard),
    CardMovedIntoScopeList(BoardCard),
    CardUpdatedInScopeList(BoardCard),
    CardMovedToDoneList(BoardCard),
    CardDeleted { card_id: String },
}

impl BoardEvent {
    /// Translates a webhook action into the events it implies, in the order
    /// they should be applied. A list whose name matches both scopes yields
    /// both an entry and a completion event.
    pub fn from_action(action: BoardAction) -> Vec<Self> {
        let BoardAction {
            kind,
            card,
            list,
            list_after,
        } = action;

        match kind {
            BoardActionKind::CreateCard => {
                if ListScope::ToDo.contains(list.as_ref()) {
                    vec![Self::CardCreatedInScopeList(card)]
                } else {
                    Vec::new()
                }
            }
            BoardActionKind::UpdateCard => {
                let mut events = Vec::new();
                if ListScope::ToDo.contains(list_after.as_ref()) {
                    events.push(Self::CardMovedIntoScopeList(card.clone()));
                } else if ListScope::ToDo.contains(list.as_ref()) {
                    events.push(Self::CardUpdatedInScopeList(card.clone()));
                }
                if ListScope::Done.contains(list_after.as_ref()) {
                    events.push(Self::CardMovedToDoneList(card));
                }
                events
            }
            BoardActionKind::DeleteCard => vec![Self::CardDeleted { card_id: card.id }],
            BoardActionKind::Other(_) => Vec::new(),
        }
    }
}
