//! End-to-end tests for gesture capture, classification and placement.

use sketchtoe_core::{
    BoardLayout, CaptureError, ClassifierThresholds, EventLog, GameEvent, GameStatus,
    GestureOutcome, PlacementOutcome, Player, Point, Position, RejectReason, SketchGame,
    Square, StatusReport, TiltThresholds,
};

/// Closed loop around the centre of `position` on the default 300 board.
fn circle_in(position: Position) -> Vec<Point> {
    let center = BoardLayout::default().cell_center(position);
    (0..=24)
        .map(|i| {
            let a = i as f64 / 24.0 * std::f64::consts::TAU;
            Point::new(center.x + 30.0 * a.sin(), center.y - 30.0 * a.cos())
        })
        .collect()
}

/// Zigzag covering most of `position`.
fn cross_in(position: Position) -> Vec<Point> {
    let o = BoardLayout::default().cell_origin(position);
    [(25.0, 25.0), (50.0, 50.0), (75.0, 75.0), (75.0, 25.0), (25.0, 75.0)]
        .iter()
        .map(|(dx, dy)| Point::new(o.x + dx, o.y + dy))
        .collect()
}

fn draw(game: &mut SketchGame<EventLog>, points: &[Point]) -> Option<GestureOutcome> {
    game.start_gesture_at(points[0])?.ok()?;
    for p in &points[1..] {
        game.extend_gesture(*p);
    }
    game.finish_gesture()
}

#[test]
fn test_drawn_circle_places_o_and_emits_events() {
    let mut game = SketchGame::new(EventLog::new());
    let outcome = draw(&mut game, &circle_in(Position::Center));

    assert_eq!(
        outcome,
        Some(GestureOutcome::Placed(PlacementOutcome::Continue { next: Player::X }))
    );
    assert_eq!(
        game.observer().events(),
        &[
            GameEvent::GestureStarted {
                position: Position::Center,
                player: Player::O,
            },
            GameEvent::Placement {
                position: Position::Center,
                symbol: Player::O,
            },
            GameEvent::StatusChanged {
                status: StatusReport::Turn(Player::X),
            },
        ]
    );
    assert_eq!(
        game.observer().last().map(ToString::to_string),
        Some("Next up: X! Draw with your finger.".to_string())
    );
}

#[test]
fn test_only_one_gesture_at_a_time() {
    let mut game = SketchGame::new(EventLog::new());
    game.start_gesture(Position::TopLeft, Point::new(10.0, 10.0))
        .unwrap();

    let second = game.start_gesture(Position::BottomRight, Point::new(250.0, 250.0));
    assert_eq!(second, Err(CaptureError::AlreadyCapturing(Position::TopLeft)));
    assert_eq!(game.observer().events().len(), 1);
    assert_eq!(
        game.capture().path().map(|p| *p.position()),
        Some(Position::TopLeft)
    );
}

#[test]
fn test_samples_outside_the_cell_still_count() {
    let mut game = SketchGame::new(EventLog::new());
    // The loop spills from TopLeft into its neighbours.
    let center = Point::new(100.0, 100.0);
    game.start_gesture(Position::TopLeft, Point::new(90.0, 60.0))
        .unwrap();
    for i in 1..=24 {
        let a = i as f64 / 24.0 * std::f64::consts::TAU;
        game.extend_gesture(Point::new(
            center.x - 10.0 + 40.0 * a.sin(),
            center.y - 40.0 * a.cos(),
        ));
    }
    assert!(matches!(
        game.finish_gesture(),
        Some(GestureOutcome::Placed(_))
    ));
    assert_eq!(
        game.game().board().get(Position::TopLeft),
        Square::Occupied(Player::O)
    );
}

#[test]
fn test_rejected_gesture_keeps_the_turn() {
    let mut game = SketchGame::new(EventLog::new());
    // An X shape drawn while O is to move is judged as an O.
    let outcome = draw(&mut game, &cross_in(Position::Center));

    assert!(matches!(outcome, Some(GestureOutcome::Rejected(_))));
    assert_eq!(game.game().current_player(), Player::O);
    assert!(game.game().board().is_blank());
    assert!(!game.capture().is_capturing());
    assert!(matches!(
        game.observer().last(),
        Some(GameEvent::GestureRejected {
            player: Player::O,
            ..
        })
    ));
}

#[test]
fn test_tap_reads_as_lifted_finger() {
    let mut game = SketchGame::new(EventLog::new());
    let center = game.layout().cell_center(Position::TopRight);
    let outcome = draw(&mut game, &[center, center]);

    assert_eq!(
        outcome,
        Some(GestureOutcome::Rejected(RejectReason::TooFewPoints { count: 2 }))
    );
    assert_eq!(
        game.observer().last().map(ToString::to_string),
        Some("You lifted your finger! Start over. Still O's turn.".to_string())
    );
}

#[test]
fn test_cancel_is_classified_like_finish() {
    let mut game = SketchGame::new(EventLog::new());
    let points = circle_in(Position::BottomLeft);
    game.start_gesture_at(points[0]).unwrap().unwrap();
    for p in &points[1..] {
        game.extend_gesture(*p);
    }
    assert!(matches!(
        game.cancel_gesture(),
        Some(GestureOutcome::Placed(_))
    ));
    assert_eq!(game.cancel_gesture(), None);
}

#[test]
fn test_start_on_occupied_cell_is_refused_silently() {
    let mut game = SketchGame::new(EventLog::new());
    draw(&mut game, &circle_in(Position::Center)).unwrap();
    let before = game.observer().events().len();

    let result = game.start_gesture(Position::Center, Point::new(150.0, 150.0));
    assert_eq!(result, Err(CaptureError::SquareOccupied(Position::Center)));
    assert_eq!(game.observer().events().len(), before);
    assert!(!game.capture().is_capturing());
}

#[test]
fn test_full_game_to_a_win_then_input_is_refused() {
    let mut game = SketchGame::new(EventLog::new());
    let moves = [
        circle_in(Position::TopLeft),
        cross_in(Position::MiddleLeft),
        circle_in(Position::TopCenter),
        cross_in(Position::Center),
        circle_in(Position::TopRight),
    ];
    for stroke in &moves {
        assert!(matches!(
            draw(&mut game, stroke),
            Some(GestureOutcome::Placed(_))
        ));
    }

    assert_eq!(*game.game().status(), GameStatus::Won(Player::O));
    assert_eq!(game.status_report(), StatusReport::Won(Player::O));
    assert_eq!(
        game.observer().last().map(ToString::to_string),
        Some("O wins!".to_string())
    );
    assert_eq!(
        game.start_gesture(Position::BottomRight, Point::new(250.0, 250.0)),
        Err(CaptureError::GameOver)
    );
}

#[test]
fn test_off_board_start_is_ignored() {
    let mut game = SketchGame::new(EventLog::new());
    assert_eq!(game.start_gesture_at(Point::new(-1.0, 20.0)), None);
    assert_eq!(game.start_gesture_at(Point::new(20.0, 300.0)), None);
    assert!(game.observer().events().is_empty());
}

#[test]
fn test_tilt_toggles_with_hysteresis() {
    let mut game = SketchGame::new(EventLog::new());
    let toggles: Vec<Option<bool>> = [0.0, 70.0, 40.0, 20.0]
        .into_iter()
        .map(|d| game.submit_tilt(d))
        .collect();

    assert_eq!(toggles, vec![None, Some(true), None, Some(false)]);
    assert_eq!(game.observer().events().len(), 2);
    assert_eq!(
        game.observer().events()[0].to_string(),
        "Board flipped! O to play."
    );
}

#[test]
fn test_reset_keeps_flip_and_clears_gesture() {
    let mut game = SketchGame::new(EventLog::new());
    draw(&mut game, &circle_in(Position::Center)).unwrap();
    game.submit_tilt(80.0);
    game.start_gesture(Position::TopLeft, Point::new(10.0, 10.0))
        .unwrap();
    game.observer_mut().drain();

    game.reset();

    assert!(game.game().board().is_blank());
    assert_eq!(game.game().current_player(), Player::O);
    assert!(!game.capture().is_capturing());
    assert!(game.is_flipped());
    assert_eq!(
        game.observer().events(),
        &[
            GameEvent::Reset,
            GameEvent::StatusChanged {
                status: StatusReport::Turn(Player::O),
            },
        ]
    );
}

#[test]
fn test_custom_settings_and_closure_observer() {
    let mut seen = Vec::new();
    {
        let mut game = SketchGame::with_settings(
            |e: &GameEvent| seen.push(e.clone()),
            BoardLayout::new(600.0),
            ClassifierThresholds::default(),
            TiltThresholds {
                flip_above: 45.0,
                unflip_below: 10.0,
            },
        );
        assert_eq!(game.classifier().cell_dim(), 200.0);
        assert_eq!(game.submit_tilt(50.0), Some(true));
    }
    assert_eq!(
        seen,
        vec![GameEvent::OrientationToggled {
            flipped: true,
            current_player: Player::O,
        }]
    );
}
