use galley_core::Command;

/// Default run-length weight for [`path_entropy`].
pub const DEFAULT_RHO: f64 = 5.0;

/// Path-smoothness score: partition the command sequence into maximal runs
/// of one repeated command; each run of length `n` contributes
/// `ln(rho) - ln(n)`, except wait-placeholder runs, which contribute
/// nothing. Fewer, longer runs score lower; the motion is more predictable.
///
/// Computed post hoc over accepted plans as a tie-break signal; the search
/// itself never sees it.
pub fn path_entropy(commands: &[Option<Command>], rho: f64) -> f64 {
    let Some(&first) = commands.first() else {
        return 0.0;
    };

    let base = rho.ln();
    let mut total = 0.0;
    let mut run_command = first;
    let mut run_length = 1u32;

    for &command in &commands[1..] {
        if command == run_command {
            run_length += 1;
        } else {
            if run_command.is_some() {
                total += base - f64::from(run_length).ln();
            }
            run_command = command;
            run_length = 1;
        }
    }
    if run_command.is_some() {
        total += base - f64::from(run_length).ln();
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    const EAST: Option<Command> = Some(Command::Move { dx: 1, dy: 0 });
    const SOUTH: Option<Command> = Some(Command::Move { dx: 0, dy: 1 });

    #[test]
    fn single_run_of_rho_length_scores_zero() {
        // ln(5) - ln(5) = 0.
        let commands = [EAST; 5];
        assert!(path_entropy(&commands, 5.0).abs() < 1e-12);
    }

    #[test]
    fn placeholder_runs_score_zero() {
        let commands: [Option<Command>; 4] = [None, None, None, None];
        assert_eq!(path_entropy(&commands, 5.0), 0.0);
        assert_eq!(path_entropy(&[], 5.0), 0.0);
    }

    #[test]
    fn shorter_runs_score_higher() {
        let smooth = [EAST, EAST, EAST, EAST, SOUTH, SOUTH];
        let jittery = [EAST, SOUTH, EAST, SOUTH, EAST, SOUTH];
        assert!(path_entropy(&jittery, 5.0) > path_entropy(&smooth, 5.0));
    }

    #[test]
    fn placeholders_split_runs_without_contributing() {
        // Two east runs of lengths 2 and 1, split by waits.
        let commands = [EAST, EAST, None, None, EAST];
        let expected = (5.0f64.ln() - 2.0f64.ln()) + (5.0f64.ln() - 1.0f64.ln());
        assert!((path_entropy(&commands, 5.0) - expected).abs() < 1e-12);
    }
}
