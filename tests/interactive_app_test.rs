// ABOUTME: Integration tests for the interactive event loop
// ABOUTME: Commands, background completions and session changes flow through one event queue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use common::{Harness, COOK_EMAIL, COOK_PASSWORD};
use recipe_finder::{
    app::{App, Command, Flow, RecipeRef, UiEvent},
    constants::messages,
    models::Theme,
    view::Content,
};

fn output(app: &App<Vec<u8>>) -> String {
    String::from_utf8(app.output().clone()).unwrap()
}

async fn send(app: &mut App<Vec<u8>>, line: &str) -> Flow {
    app.sender().send(UiEvent::Input(line.to_owned())).unwrap();
    app.next_event().await.unwrap()
}

#[tokio::test]
async fn test_search_completes_through_the_queue() {
    let harness = Harness::anonymous();
    let mut app = App::new(&harness.services, Vec::new());

    assert_eq!(send(&mut app, "search arrabiata").await, Flow::Continue);
    assert_eq!(app.controller().state().content, Content::Loading);

    assert_eq!(app.next_event().await.unwrap(), Flow::Continue);
    match &app.controller().state().content {
        Content::Cards(cards) => assert_eq!(cards[0].id, "52771"),
        other => panic!("expected cards, got {other:?}"),
    }
    assert!(output(&app).contains("Spicy Arrabiata Penne"));
}

#[tokio::test]
async fn test_errors_are_printed_and_the_loop_continues() {
    let harness = Harness::anonymous();
    let mut app = App::new(&harness.services, Vec::new());

    assert_eq!(send(&mut app, "dance").await, Flow::Continue);
    assert_eq!(send(&mut app, "search   ").await, Flow::Continue);

    let printed = output(&app);
    assert!(printed.contains("Error: Unknown command 'dance'"));
    assert!(printed.contains(&format!("Error: {}", messages::EMPTY_QUERY)));
    assert!(printed.ends_with("> "));
}

#[tokio::test]
async fn test_card_positions_resolve_against_the_screen() {
    let harness = Harness::anonymous();
    let mut app = App::new(&harness.services, Vec::new());
    send(&mut app, "search pad").await;
    app.next_event().await.unwrap();

    app.handle_command(Command::Fav(Some(RecipeRef::Card(1))))
        .await
        .unwrap();
    assert!(output(&app).contains("Saved to favorites"));
    assert_eq!(harness.services.favorites().count().unwrap(), 1);

    let error = app
        .handle_command(Command::Open(RecipeRef::Card(9)))
        .await
        .unwrap_err();
    assert!(error.user_message().contains("#9"));

    app.handle_command(Command::Open(RecipeRef::Card(1)))
        .await
        .unwrap();
    let modal = app.controller().state().modal.as_ref().unwrap();
    assert_eq!(modal.recipe.summary.id, "52772");
}

#[tokio::test]
async fn test_signed_out_favorite_is_blocked_before_lookup() {
    let harness = Harness::provider();
    let mut app = App::new(&harness.services, Vec::new());

    assert_eq!(send(&mut app, "fav 52772").await, Flow::Continue);

    assert!(output(&app).contains(&format!("Error: {}", messages::SIGN_IN_TO_FAVORITE)));
    assert!(harness.recipes.lookups().is_empty());
    assert_eq!(harness.services.favorites().count().unwrap(), 0);
}

#[tokio::test]
async fn test_sign_in_and_out_arrive_as_session_events() {
    let harness = Harness::provider();
    let mut app = App::new(&harness.services, Vec::new());

    app.handle_command(Command::SignIn {
        email: COOK_EMAIL.to_owned(),
        password: COOK_PASSWORD.to_owned(),
    })
    .await
    .unwrap();
    assert!(output(&app).contains(&format!("Signed in as {COOK_EMAIL}")));
    assert!(app.controller().session().is_none());

    app.next_event().await.unwrap();
    assert!(app.controller().session().is_some());

    send(&mut app, "favorites").await;
    send(&mut app, "signout").await;
    app.next_event().await.unwrap();

    assert!(app.controller().session().is_none());
    assert_eq!(
        app.controller().state().content,
        Content::Placeholder(messages::SIGN_IN_FOR_FAVORITES.to_owned())
    );
}

#[tokio::test]
async fn test_theme_and_quit() {
    let harness = Harness::anonymous();
    let mut app = App::new(&harness.services, Vec::new());

    send(&mut app, "theme toggle").await;
    assert!(output(&app).contains("Theme: dark"));
    assert_eq!(harness.services.theme().current().unwrap(), Theme::Dark);

    assert_eq!(send(&mut app, "quit").await, Flow::Quit);
    app.sender().send(UiEvent::InputClosed).unwrap();
    assert_eq!(app.next_event().await.unwrap(), Flow::Quit);
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_run_stops_at_end_of_input() {
    let harness = Harness::anonymous();
    let out = SharedBuf::default();

    App::new(&harness.services, out.clone())
        .run(&b"help\ntheme dark\n"[..])
        .await
        .unwrap();

    let printed = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
    assert!(printed.contains(messages::START_SEARCHING));
    assert!(printed.contains("Theme: dark"));
}
