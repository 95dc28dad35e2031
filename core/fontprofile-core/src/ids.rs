//! Unique identifier generation (made by FontLab https://www.fontlab.com/)

use uuid::Uuid;

/// Source of `PayloadUUID` values.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random version 4 UUIDs in lowercase hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

/// Deterministic UUID-shaped ids counting up from 1.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        Uuid::from_u128(self.next).hyphenated().to_string()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}
