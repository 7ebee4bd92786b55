use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// An accepted navigation step. `from == to` when a slide is re-entered via `goto`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub from: u32,
    pub to: u32,
}

/// Observer invoked synchronously after every accepted navigation step.
pub trait TransitionListener: Send {
    fn on_transition(&mut self, transition: &Transition);
}

impl<F> TransitionListener for F
where
    F: FnMut(&Transition) + Send,
{
    fn on_transition(&mut self, transition: &Transition) {
        self(transition)
    }
}

/// Position within a fixed-length run of slides, indexed `1..=total`.
pub struct Navigator {
    current: u32,
    total: u32,
    listeners: Vec<Box<dyn TransitionListener>>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .field("total", &self.total)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Navigator {
    pub fn new(total: u32) -> Result<Self> {
        Self::starting_at(total, 1)
    }

    pub fn starting_at(total: u32, start: u32) -> Result<Self> {
        if total == 0 {
            bail!("a deck needs at least one slide");
        }
        if start < 1 || start > total {
            bail!("start slide {start} is outside 1..={total}");
        }

        Ok(Self {
            current: start,
            total,
            listeners: Vec::new(),
        })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Listeners run in registration order.
    pub fn add_listener(&mut self, listener: impl TransitionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn next(&mut self) -> Option<Transition> {
        if self.current < self.total {
            self.move_to(self.current + 1)
        } else {
            None
        }
    }

    pub fn previous(&mut self) -> Option<Transition> {
        if self.current > 1 {
            self.move_to(self.current - 1)
        } else {
            None
        }
    }

    /// Out-of-range targets are dropped without notifying anyone.
    pub fn goto(&mut self, slide: u32) -> Option<Transition> {
        if slide >= 1 && slide <= self.total {
            self.move_to(slide)
        } else {
            None
        }
    }

    fn move_to(&mut self, slide: u32) -> Option<Transition> {
        let transition = Transition {
            from: self.current,
            to: slide,
        };
        self.current = slide;

        for listener in self.listeners.iter_mut() {
            listener.on_transition(&transition);
        }

        Some(transition)
    }
}
