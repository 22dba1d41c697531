//! Screen state machine
//!
//! Login → Playing → Result, with Play Again looping back to Playing. The
//! best-distance record is read once when the app starts and written when a
//! session ends above it.

use serde::{Deserialize, Serialize};

use crate::highscores::{BestDistance, RecordStore};
use crate::setup::{PlayerProfile, SetupError, SetupForm};
use crate::sim::{GameSession, TickResult};
use crate::tuning::Tuning;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Login,
    Playing,
    Result,
}

/// Input gathered for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub jump: bool,
}

/// Final numbers shown on the result screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub distance: f32,
    pub pickups: u32,
    pub elapsed_seconds: f64,
    /// This run raised the stored record
    pub new_record: bool,
}

pub struct App<S: RecordStore> {
    screen: Screen,
    session: GameSession,
    store: S,
    best: BestDistance,
    profile: Option<PlayerProfile>,
    summary: Option<SessionSummary>,
    last_error: Option<SetupError>,
    running: bool,
}

impl<S: RecordStore> App<S> {
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let best = store.load();
        Self {
            screen: Screen::Login,
            session: GameSession::new(seed, tuning),
            store,
            best,
            profile: None,
            summary: None,
            last_error: None,
            running: true,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn best(&self) -> BestDistance {
        self.best
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Message for the login screen, if the last submit failed
    pub fn last_error(&self) -> Option<SetupError> {
        self.last_error
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start pressed on the login screen; true when a session started
    ///
    /// A rejected form leaves its message in `last_error`.
    pub fn submit_setup(&mut self, form: &SetupForm) -> bool {
        if self.screen != Screen::Login {
            return false;
        }
        match form.validate() {
            Ok(profile) => {
                log::info!("Player {} ({}) ready", profile.name, profile.age);
                self.session.reset(profile.appearance);
                self.profile = Some(profile);
                self.last_error = None;
                self.screen = Screen::Playing;
                true
            }
            Err(e) => {
                log::debug!("Setup rejected: {}", e);
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Advance one frame; `None` when not on the playing screen
    pub fn frame(&mut self, dt: f64, input: FrameInput) -> Option<TickResult> {
        if self.screen != Screen::Playing {
            return None;
        }

        let result = self.session.advance(dt, input.jump);
        if result.is_over {
            self.finish(&result);
        }
        Some(result)
    }

    fn finish(&mut self, result: &TickResult) {
        let new_record = self.best.is_beaten_by(result.distance);
        if new_record {
            self.best = BestDistance::new(BestDistance::from_session(result.distance));
            self.store.save(self.best);
        }
        self.summary = Some(SessionSummary {
            distance: result.distance,
            pickups: result.pickups,
            elapsed_seconds: result.elapsed_seconds,
            new_record,
        });
        self.screen = Screen::Result;
    }

    /// Play Again on the result screen; keeps the chosen appearance
    pub fn play_again(&mut self) -> bool {
        if self.screen != Screen::Result {
            return false;
        }
        let appearance = self.profile.as_ref().map(|p| p.appearance).unwrap_or_default();
        self.session.reset(appearance);
        self.summary = None;
        self.screen = Screen::Playing;
        true
    }

    /// Exit on the result screen (or window close anywhere)
    pub fn exit(&mut self) {
        self.running = false;
    }
}
