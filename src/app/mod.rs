// ABOUTME: Single-threaded interactive event loop around the view controller
// ABOUTME: Input lines, background completions and session changes arrive as events on one queue

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

//! # Interactive app
//!
//! The loop owns the [`ViewController`]. Searches and trending loads run as
//! spawned tasks that never touch the controller; they post their results
//! back as [`UiEvent`]s. The auth subscription forwards session transitions
//! onto the same queue, so every handler runs to completion before the next
//! event is looked at.

/// REPL command grammar
pub mod command;
/// Text rendering of screens
pub mod render;

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

pub use command::{Command, RecipeRef, ThemeAction, HELP};

use crate::auth::{AuthSessionAdapter, Subscription};
use crate::context::ServiceContext;
use crate::errors::{AppError, AppResult};
use crate::external::RecipeSource;
use crate::models::{RecipeSummary, Session};
use crate::theme::ThemeStore;
use crate::view::{Content, SearchTicket, TrendingTicket, ViewController};

/// Everything the loop reacts to
#[derive(Debug)]
pub enum UiEvent {
    /// One line of user input
    Input(String),
    /// Input reached end of file
    InputClosed,
    /// A background search finished
    SearchDone {
        /// Ticket issued when the search began
        ticket: SearchTicket,
        /// Search outcome
        result: AppResult<Vec<RecipeSummary>>,
    },
    /// A background trending load finished
    TrendingDone {
        /// Ticket issued when the load began
        ticket: TrendingTicket,
        /// Load outcome
        result: AppResult<Vec<RecipeSummary>>,
    },
    /// The auth adapter reported a session transition
    SessionChanged(Option<Session>),
}

/// Whether the loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Wait for the next event
    Continue,
    /// Exit
    Quit,
}

/// Interactive session writing to `out`
pub struct App<W> {
    controller: ViewController,
    auth: Arc<dyn AuthSessionAdapter>,
    theme: ThemeStore,
    out: W,
    events: UnboundedSender<UiEvent>,
    inbox: UnboundedReceiver<UiEvent>,
    _session_subscription: Subscription,
}

impl<W: Write> App<W> {
    /// Create the app and subscribe to session changes
    pub fn new(services: &ServiceContext, out: W) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        let forward = events.clone();
        let subscription = services.auth().subscribe(Arc::new(move |session| {
            if forward.send(UiEvent::SessionChanged(session.cloned())).is_err() {
                debug!("Event loop gone; dropping session change");
            }
        }));
        Self {
            controller: services.controller(),
            auth: Arc::clone(services.auth()),
            theme: services.theme().clone(),
            out,
            events,
            inbox,
            _session_subscription: subscription,
        }
    }

    /// The controller, for inspection
    pub const fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Output sink
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Sender for injecting events
    #[must_use]
    pub fn sender(&self) -> UnboundedSender<UiEvent> {
        self.events.clone()
    }

    /// Read commands from `input` until `quit` or end of input
    ///
    /// # Errors
    ///
    /// Returns an error only if the output cannot be written
    pub async fn run<R>(mut self, input: R) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let lines_tx = self.events.clone();
        tokio::spawn(async move {
            let mut lines = input.lines();
            loop {
                let event = match lines.next_line().await {
                    Ok(Some(line)) => UiEvent::Input(line),
                    Ok(None) => UiEvent::InputClosed,
                    Err(e) => {
                        warn!(error = %e, "Input read failed");
                        UiEvent::InputClosed
                    }
                };
                let closed = matches!(event, UiEvent::InputClosed);
                if lines_tx.send(event).is_err() || closed {
                    break;
                }
            }
        });

        self.draw()?;
        self.prompt()?;
        while self.next_event().await? == Flow::Continue {}
        Ok(())
    }

    /// Wait for one event and handle it
    ///
    /// # Errors
    ///
    /// Returns an error only if the output cannot be written
    pub async fn next_event(&mut self) -> AppResult<Flow> {
        let Some(event) = self.inbox.recv().await else {
            return Ok(Flow::Quit);
        };
        let prompt = matches!(event, UiEvent::Input(_));
        let flow = match self.handle_event(event).await {
            Ok(flow) => flow,
            Err(e) => {
                writeln!(self.out, "Error: {}", e.user_message())?;
                Flow::Continue
            }
        };
        if prompt && flow == Flow::Continue {
            self.prompt()?;
        }
        Ok(flow)
    }

    /// Apply one event
    ///
    /// # Errors
    ///
    /// Returns the user-facing error of the failed action
    pub async fn handle_event(&mut self, event: UiEvent) -> AppResult<Flow> {
        match event {
            UiEvent::Input(line) if line.trim().is_empty() => Ok(Flow::Continue),
            UiEvent::Input(line) => {
                let command: Command = line.parse()?;
                self.handle_command(command).await
            }
            UiEvent::InputClosed => Ok(Flow::Quit),
            UiEvent::SearchDone { ticket, result } => {
                if self.controller.complete_search(&ticket, result) {
                    self.draw()?;
                }
                Ok(Flow::Continue)
            }
            UiEvent::TrendingDone { ticket, result } => {
                if self.controller.complete_trending(&ticket, result) {
                    self.draw()?;
                }
                Ok(Flow::Continue)
            }
            UiEvent::SessionChanged(session) => {
                let signed_in = session.is_some();
                self.controller.session_changed(session);
                if signed_in {
                    if let Err(e) = self.controller.refresh_own_rating().await {
                        warn!(error = %e, "Could not refresh own rating");
                    }
                }
                self.draw()?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run one command
    ///
    /// # Errors
    ///
    /// Returns the user-facing error of the failed action
    pub async fn handle_command(&mut self, command: Command) -> AppResult<Flow> {
        match command {
            Command::Search(query) => {
                let ticket = self.controller.begin_search(&query)?;
                let source = self.controller.recipe_source();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = source.search(&ticket.query).await;
                    let _ = events.send(UiEvent::SearchDone { ticket, result });
                });
                self.draw()?;
            }
            Command::Open(target) => {
                let id = self.resolve_id(&target)?;
                self.controller.open_recipe(&id).await?;
                self.draw()?;
            }
            Command::Close => {
                self.controller.close_modal();
                self.draw()?;
            }
            Command::Fav(target) => {
                let favorited = match target {
                    None => self.controller.toggle_favorite()?,
                    Some(target) => {
                        self.controller.ensure_favorites_available()?;
                        let summary = self.resolve_summary(&target).await?;
                        self.controller.toggle_favorite_recipe(&summary)?
                    }
                };
                writeln!(
                    self.out,
                    "{}",
                    if favorited {
                        "Saved to favorites"
                    } else {
                        "Removed from favorites"
                    }
                )?;
                self.draw()?;
            }
            Command::Favorites => {
                self.controller.toggle_favorites_view()?;
                self.draw()?;
            }
            Command::Trending => {
                if let Some(ticket) = self.controller.toggle_trending_view()? {
                    let source = self.controller.recipe_source();
                    let events = self.events.clone();
                    tokio::spawn(async move {
                        let result = ViewController::load_trending(source.as_ref(), &ticket.ids).await;
                        let _ = events.send(UiEvent::TrendingDone { ticket, result });
                    });
                }
                self.draw()?;
            }
            Command::Rate(value) => {
                let stored = self.controller.rate(value).await?;
                match stored {
                    Some(stars) => writeln!(self.out, "Rated {}", stars.stars())?,
                    None => writeln!(self.out, "Rating saved")?,
                }
                self.draw()?;
            }
            Command::SignUp { email, password } => {
                let user = self.auth.sign_up(&email, &password).await?;
                if self.auth.current().is_some() {
                    writeln!(self.out, "Account created. Signed in as {}", user.email.as_deref().unwrap_or(&user.id))?;
                } else {
                    writeln!(self.out, "Account created. Check your email to confirm it, then sign in.")?;
                }
            }
            Command::SignIn { email, password } => {
                let user = self.auth.sign_in(&email, &password).await?;
                writeln!(self.out, "Signed in as {}", user.email.as_deref().unwrap_or(&user.id))?;
            }
            Command::SignOut => {
                self.auth.sign_out().await?;
                writeln!(self.out, "Signed out")?;
            }
            Command::Theme(action) => {
                let theme = match action {
                    ThemeAction::Show => self.theme.current()?,
                    ThemeAction::Toggle => self.theme.toggle()?,
                    ThemeAction::Set(theme) => {
                        self.theme.set(theme)?;
                        theme
                    }
                };
                writeln!(self.out, "Theme: {theme}")?;
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn displayed_cards(&self) -> &[RecipeSummary] {
        match &self.controller.state().content {
            Content::Cards(cards) => cards,
            _ => &[],
        }
    }

    fn resolve_id(&self, target: &RecipeRef) -> AppResult<String> {
        match target {
            RecipeRef::Id(id) => Ok(id.clone()),
            RecipeRef::Card(position) => self
                .displayed_cards()
                .get(position - 1)
                .map(|card| card.id.clone())
                .ok_or_else(|| AppError::invalid_input(format!("No card #{position} on screen"))),
        }
    }

    async fn resolve_summary(&self, target: &RecipeRef) -> AppResult<RecipeSummary> {
        let id = self.resolve_id(target)?;
        let known = self
            .displayed_cards()
            .iter()
            .chain(&self.controller.state().last_search_results)
            .find(|card| card.id == id)
            .cloned();
        match known {
            Some(summary) => Ok(summary),
            None => Ok(self.controller.recipe_source().lookup(&id).await?.summary()),
        }
    }

    fn draw(&mut self) -> AppResult<()> {
        let screen = self.controller.screen()?;
        let theme = self.theme.current()?;
        write!(self.out, "\n{}", render::render_screen(&screen, theme))?;
        Ok(())
    }

    fn prompt(&mut self) -> AppResult<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}
