use std::error::Error;

use jigsaw::{svg::gen_svg_string, RenderingOpts, Session, SessionConfig};

fn main() -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(SessionConfig::default());
    session.generate(4, 6);
    std::fs::write(
        "solved.svg",
        gen_svg_string(session.problem(), &RenderingOpts::default(), 0.5),
    )?;

    session.shuffle();
    println!("{}", session.problem().ascii_art());
    std::fs::write(
        "shuffled.svg",
        gen_svg_string(session.problem(), &RenderingOpts::default(), 0.5),
    )?;

    // Only talk to a solver if the user has said where one is
    #[cfg(feature = "http")]
    {
        if let Ok(base_url) = std::env::var("JIGSAW_SOLVER_URL") {
            solve(&mut session, base_url)?;
        }
    }

    Ok(())
}

#[cfg(feature = "http")]
fn solve(session: &mut Session, base_url: String) -> Result<(), Box<dyn Error>> {
    let config = jigsaw::SolverConfig {
        base_url,
        ..jigsaw::SolverConfig::default()
    };
    let transport = jigsaw::solve::HttpTransport::new(&config);
    match session.solve_with(&transport)? {
        jigsaw::SolveOutcome::Solved => {
            if let Some(solution) = session.solution() {
                println!("{}", solution.ascii_art());
            }
        }
        outcome => println!("{:?}", outcome),
    }
    Ok(())
}
