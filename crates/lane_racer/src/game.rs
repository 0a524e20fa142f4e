//! The game as an engine application
//!
//! [`LaneRacer`] runs one race and then stays on the end screen until the
//! player quits.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use road_engine::config::Config;
use road_engine::input::KeyCode;
use road_engine::render::Renderer;
use road_engine::{AppError, AppEvent, Application, Engine};

use crate::camera::Lens;
use crate::car::Direction;
use crate::config::GameConfig;
use crate::finish::FinishScreen;
use crate::session::{Outcome, RaceSession};
use crate::GameError;

enum Screen {
    Race(Box<RaceSession>),
    Finish(FinishScreen),
}

/// Lane racing game
pub struct LaneRacer {
    config: GameConfig,
    lens: Lens,
    screen: Screen,
}

impl LaneRacer {
    /// Lay out a course and load its models
    ///
    /// Uses the configured seed when there is one.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let mut rng = match config.gameplay.seed {
            Some(seed) => {
                log::info!("Course seed {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        let session = RaceSession::generate(&config.gameplay, &config.assets.model_dir, &mut rng)?;
        Ok(Self::with_session(config, session))
    }

    /// Game on a prepared course
    pub fn with_session(config: GameConfig, session: RaceSession) -> Self {
        Self {
            lens: config.render.lens(),
            config,
            screen: Screen::Race(Box::new(session)),
        }
    }

    /// Outcome once the race is over
    pub const fn outcome(&self) -> Option<Outcome> {
        match &self.screen {
            Screen::Race(_) => None,
            Screen::Finish(finish) => Some(finish.outcome()),
        }
    }

    /// The race, while it is still on
    pub fn session(&self) -> Option<&RaceSession> {
        match &self.screen {
            Screen::Race(session) => Some(session.as_ref()),
            Screen::Finish(_) => None,
        }
    }

    /// The end screen, once the race is over
    pub const fn finish_screen(&self) -> Option<&FinishScreen> {
        match &self.screen {
            Screen::Race(_) => None,
            Screen::Finish(finish) => Some(finish),
        }
    }
}

impl Application for LaneRacer {
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        self.config.validate()?;
        log::info!("Driving game ready: {:?}", self.config.gameplay);
        Ok(())
    }

    fn handle_event(&mut self, _engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        let AppEvent::KeyPressed(key) = event else {
            return Ok(());
        };

        match &mut self.screen {
            Screen::Race(session) => match key {
                KeyCode::Left => {
                    session.steer(Direction::Left);
                }
                KeyCode::Right => {
                    session.steer(Direction::Right);
                }
                KeyCode::Space => {
                    session.switch_view();
                }
                _ => {}
            },
            Screen::Finish(finish) => {
                finish.handle_key(key);
            }
        }
        Ok(())
    }

    fn update(&mut self, _engine: &mut Engine, now: Duration) -> Result<(), AppError> {
        if let Screen::Race(session) = &mut self.screen {
            if let Some(outcome) = session.tick(now) {
                self.screen = Screen::Finish(FinishScreen::new(outcome, self.config.gameplay.lane_width, now));
            }
        }
        Ok(())
    }

    fn render(&mut self, renderer: &mut Renderer, now: Duration) -> Result<(), AppError> {
        match &mut self.screen {
            Screen::Race(session) => session.render(renderer, &self.lens, now, self.config.render.show_bounds),
            Screen::Finish(finish) => finish.render(renderer, &self.lens, now),
        }
        Ok(())
    }

    fn title(&self, now: Duration) -> String {
        match &self.screen {
            Screen::Race(session) => session.title(now),
            Screen::Finish(finish) => finish.title(),
        }
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        match self.outcome() {
            Some(outcome) => log::info!("Leaving the end screen: {outcome:?}"),
            None => log::info!("Race abandoned"),
        }
    }
}
