use std::io::Write;

use services::LeaderboardService;

/// Print the best `top` entries as `"{rank}. {name}: {score}"` lines.
pub fn print_top<W: Write>(
    board: &LeaderboardService,
    top: usize,
    out: &mut W,
) -> std::io::Result<()> {
    let ranked = board.top_n(top);
    if ranked.is_empty() {
        return writeln!(out, "no scores yet");
    }
    for entry in ranked {
        writeln!(out, "{}. {}", entry.rank, entry.record)?;
    }
    Ok(())
}
