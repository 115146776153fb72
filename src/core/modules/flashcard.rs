//! Flashcard deck: flip a card, then advance to the next one. Advancing
//! past the last card completes the deck.

use super::{ModuleKind, ModuleSignal, Reward, Runner};
use crate::core::content::Flashcard;

/// XP for working through a whole deck.
pub const FLASHCARD_XP: u32 = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Face {
    #[default]
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardInput {
    Flip,
    /// "I know it" and "I don't know it" both advance.
    Advance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    index: usize,
    face: Face,
    finished: bool,
}

impl FlashcardDeck {
    /// `cards` must not be empty; `LessonModule::start` guarantees it.
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            index: 0,
            face: Face::Front,
            finished: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.index]
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Runner for FlashcardDeck {
    type Input = FlashcardInput;

    fn kind(&self) -> ModuleKind {
        ModuleKind::Flashcard
    }

    fn handle(&mut self, input: FlashcardInput) -> ModuleSignal {
        if self.finished || self.cards.is_empty() {
            return ModuleSignal::Idle;
        }
        match input {
            FlashcardInput::Flip => {
                self.face = match self.face {
                    Face::Front => Face::Back,
                    Face::Back => Face::Front,
                };
                ModuleSignal::Idle
            }
            FlashcardInput::Advance => {
                self.face = Face::Front;
                if self.index + 1 == self.cards.len() {
                    self.finished = true;
                    ModuleSignal::Completed(Reward::Xp(FLASHCARD_XP))
                } else {
                    self.index += 1;
                    ModuleSignal::Idle
                }
            }
        }
    }
}
