use log::{info, LevelFilter};
use stackcalc::{repl, Session};
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut session = Session::<f64>::default();
    repl(&mut session, io::stdin().lock(), io::stdout())?;
    info!(
        "leaving with {} variables and {} functions",
        session.vars().len(),
        session.funcs().len()
    );
    Ok(())
}
