//! End-to-end tests: generate a puzzle, shuffle it, send it to a stand-in solving service and
//! check that the solution which comes back is the puzzle we started with.

use std::cell::RefCell;

use jigsaw::{
    svg::gen_svg_string, Board, RenderingOpts, Session, SessionConfig, SolveError, SolveOutcome,
    SolveRequest, SolveResponse,
};

fn seeded_session(seed: u64) -> Session {
    Session::new(SessionConfig {
        seed: Some(seed),
        ..SessionConfig::default()
    })
}

/// A stand-in for the solving service which answers with a canned body, after checking that the
/// request is well formed
fn canned_solver(body: String) -> impl Fn(&SolveRequest) -> Result<String, SolveError> {
    move |request: &SolveRequest| {
        let expected_lines = request.rows() * request.cols();
        assert_eq!(request.body().lines().count(), expected_lines);
        for line in request.body().lines() {
            let sides = line.split(',').collect::<Vec<_>>();
            assert_eq!(sides.len(), 4);
            assert!(sides.iter().all(|s| ["-", "<", ">"].contains(s)));
        }
        Ok(body.clone())
    }
}

#[test]
fn shuffled_boards_solve_back_to_the_original() {
    for (seed, rows, cols) in [(1, 1, 1), (2, 2, 5), (3, 6, 3), (4, 10, 10)] {
        let mut session = seeded_session(seed);
        session.generate(rows, cols);
        let original = session.problem().clone();
        assert!(original.is_consistent());

        session.shuffle();
        let key = session.answer_key().unwrap();
        let reply = SolveResponse::Solved(key.indexed_iter().map(|(i, p)| (i, *p)).collect());

        let outcome = session.solve_with(&canned_solver(reply.to_wire()));
        assert_eq!(outcome, Ok(SolveOutcome::Solved));
        assert_eq!(session.solution(), Some(&original));
    }
}

#[test]
fn only_the_latest_board_accepts_replies() {
    let mut session = seeded_session(99);
    session.generate(3, 3);
    session.shuffle();
    let first = session.solve_request().unwrap();
    let first_reply = {
        let key = session.answer_key().unwrap();
        SolveResponse::Solved(key.indexed_iter().map(|(i, p)| (i, *p)).collect()).to_wire()
    };

    session.shuffle();
    let second = session.solve_request().unwrap();
    assert_ne!(first.version, second.version);

    // The second reply arrives first and is unsolvable; the first reply then arrives late
    assert_eq!(
        session.apply_solve_response(&second, Ok("UNSOLVABLE:gave up".to_owned())),
        Ok(SolveOutcome::Unsolvable("gave up".to_owned()))
    );
    assert!(matches!(
        session.apply_solve_response(&first, Ok(first_reply)),
        Ok(SolveOutcome::Stale { .. })
    ));
    assert_eq!(session.solution(), None);
}

#[test]
fn service_errors_are_reported() {
    let mut session = seeded_session(5);
    session.generate(2, 2);
    session.shuffle();
    let problem = session.problem().clone();

    let calls = RefCell::new(0);
    let failing = |_: &SolveRequest| -> Result<String, SolveError> {
        *calls.borrow_mut() += 1;
        Err(SolveError::Status {
            code: 503,
            body: "busy".to_owned(),
        })
    };
    assert_eq!(
        session.solve_with(&failing),
        Err(SolveError::Status {
            code: 503,
            body: "busy".to_owned()
        })
    );
    assert_eq!(*calls.borrow(), 1);
    assert_eq!(session.problem(), &problem);
    assert_eq!(session.solution(), None);
}

#[test]
fn boards_survive_text_and_svg() {
    let mut session = seeded_session(8);
    session.generate(4, 5);
    session.shuffle();
    let board = session.problem();

    let text = board.to_text();
    assert_eq!(&Board::from_text(&text).unwrap(), board);

    let svg = gen_svg_string(board, &RenderingOpts::default(), 1.0);
    assert_eq!(svg.matches("<path").count(), 20);
    for idx in 0..20 {
        assert!(svg.contains(&format!("data-index=\"{}\"", idx)));
    }
}

#[test]
fn rotating_every_piece_four_times_changes_nothing() {
    let mut session = seeded_session(13);
    session.generate(3, 4);
    let before = session.problem().clone();
    for idx in before.pieces().indices() {
        for _ in 0..4 {
            session.rotate_piece(idx).unwrap();
        }
    }
    assert_eq!(session.problem(), &before);
    assert_eq!(session.version(), 1 + 12 * 4);
}
