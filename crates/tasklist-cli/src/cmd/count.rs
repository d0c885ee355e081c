//! `tl count` — number of stored tasks.

use super::Session;
use crate::output::render_mode;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CountOutput {
    count: usize,
}

pub fn run_count(session: &Session) -> anyhow::Result<()> {
    let count = session.service()?.count()?;
    render_mode(
        session.output,
        &CountOutput { count },
        |c, w| writeln!(w, "{}", c.count),
        |c, w| writeln!(w, "Total tasks: {}", c.count),
    )
}
