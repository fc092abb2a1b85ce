/// Rough emotional color of a message. Display layers map it to styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageTone {
    Neutral,
    Good,
    Bad,
    Death,
}

/// A human-readable event line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMessage {
    pub turn: u64,
    pub tone: MessageTone,
    pub text: String,
}

/// Append-only message buffer owned by the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLog {
    messages: Vec<GameMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: u64, tone: MessageTone, text: impl Into<String>) {
        self.messages.push(GameMessage {
            turn,
            tone,
            text: text.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameMessage> {
        self.messages.iter()
    }

    /// Removes and returns everything logged so far.
    pub fn drain(&mut self) -> Vec<GameMessage> {
        std::mem::take(&mut self.messages)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&GameMessage> {
        self.messages.last()
    }
}
