//! Single-current-screen navigation state machine.
//!
//! The controller owns the one live [`NavigationState`] in memory only; an
//! app restart always returns to the initial screen. Transitions are
//! unconditional replacements, never pushes: there is no back-stack, and no
//! edge list is enforced (which screen may request which other screen is a
//! UI concern).

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};
use crate::school::School;

/// The closed set of screens the client can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Welcome,
    Auth,
    SignUp,
    Home,
    SchoolDetails,
    Favorites,
    Recommendations,
}

impl Screen {
    /// Resolves a screen from its string name as sent by the rendering
    /// layer.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidScreen` for any name outside the closed set.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "Welcome" => Ok(Self::Welcome),
            "Auth" => Ok(Self::Auth),
            "SignUp" => Ok(Self::SignUp),
            "Home" => Ok(Self::Home),
            "SchoolDetails" => Ok(Self::SchoolDetails),
            "Favorites" => Ok(Self::Favorites),
            "Recommendations" => Ok(Self::Recommendations),
            other => Err(ScoutError::invalid_screen(other)),
        }
    }

    /// The canonical name of this screen.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Auth => "Auth",
            Self::SignUp => "SignUp",
            Self::Home => "Home",
            Self::SchoolDetails => "SchoolDetails",
            Self::Favorites => "Favorites",
            Self::Recommendations => "Recommendations",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Explicit parameters forwarded to a screen.
///
/// Screens that take no parameters receive `None`; the only parameterized
/// screen today is `SchoolDetails`, which carries the school snapshot to
/// display. An enum rather than an opaque map keeps unknown parameter
/// shapes out at the controller boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScreenParams {
    /// A school snapshot, forwarded to `SchoolDetails`.
    School(School),
}

/// The single currently active screen plus its forwarded parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub screen: Screen,
    pub params: Option<ScreenParams>,
}

/// Owns the live navigation state.
///
/// Initial state is `Welcome` with no parameters. There is no terminal
/// state; logout returns to `Auth` rather than closing.
#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    /// Creates a controller positioned on the initial `Welcome` screen.
    pub fn new() -> Self {
        Self {
            state: NavigationState {
                screen: Screen::Welcome,
                params: None,
            },
        }
    }

    /// The currently active screen and its parameters.
    pub fn current(&self) -> &NavigationState {
        &self.state
    }

    /// Replaces the live state with `screen` and `params` unconditionally.
    pub fn transition(&mut self, screen: Screen, params: Option<ScreenParams>) {
        tracing::debug!("Navigating {} -> {}", self.state.screen, screen);
        self.state = NavigationState { screen, params };
    }

    /// Resolves `name` against the closed screen set and transitions.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidScreen` for an unknown name, leaving the prior
    /// state unchanged.
    pub fn transition_named(
        &mut self,
        name: &str,
        params: Option<ScreenParams>,
    ) -> Result<&NavigationState> {
        let screen = Screen::from_name(name)?;
        self.transition(screen, params);
        Ok(&self.state)
    }
}
