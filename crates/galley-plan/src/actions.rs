use galley_core::{Command, EvalError, Loc};

/// Emit the command implied by one step of one agent's path.
///
/// `None` slots in the path mean the agent is idle. A defined-to-defined
/// step is a move, except that a pending `None` command just before it is
/// resolved retroactively into `Interact`: the agent was waiting at a
/// counter, and its first real step tells us the wait was a pickup.
fn push_command(curr: Option<Loc>, next: Option<Loc>, out: &mut Vec<Option<Command>>) {
    match (curr, next) {
        (Some(curr), Some(next)) => {
            if out.last() == Some(&None) {
                let last = out.len() - 1;
                out[last] = Some(Command::Interact);
            } else {
                out.push(Some(Command::step(curr, next)));
            }
        }
        // Path end: interact with the feature the path walked to.
        (Some(_), None) => out.push(Some(Command::Interact)),
        // About to receive a handover; command resolved later.
        (None, Some(_)) => out.push(None),
        (None, None) => {}
    }
}

/// Drop the penultimate command when it repeats the one before it: the
/// agent is already facing the right way, no in-place turn is needed.
fn drop_redundant_turn(mut commands: Vec<Option<Command>>) -> Vec<Option<Command>> {
    if commands.len() > 2 && commands[commands.len() - 2] == commands[commands.len() - 3] {
        let penultimate = commands.len() - 2;
        commands.remove(penultimate);
    }
    commands
}

/// Translate one stage's pair of location paths into primitive commands.
///
/// The outputs are padded with `None` wait slots so both agents' lists stay
/// equal length; which side gets prepended depends on which agent opens the
/// stage by picking up from a counter.
pub fn paths_to_commands(
    path0: &[Option<Loc>],
    path1: &[Option<Loc>],
) -> Result<(Vec<Option<Command>>, Vec<Option<Command>>), EvalError> {
    if path0.len() != path1.len() {
        return Err(EvalError::InvariantViolation(
            "stage paths must have equal length",
        ));
    }

    let mut commands0 = Vec::new();
    let mut commands1 = Vec::new();
    for index in 0..path0.len() {
        let next0 = path0.get(index + 1).copied().flatten();
        let next1 = path1.get(index + 1).copied().flatten();
        push_command(path0[index], next0, &mut commands0);
        push_command(path1[index], next1, &mut commands1);
    }

    let mut commands0 = drop_redundant_turn(commands0);
    let mut commands1 = drop_redundant_turn(commands1);

    if commands0.is_empty() {
        commands0 = vec![None; commands1.len()];
    } else if commands1.is_empty() {
        commands1 = vec![None; commands0.len()];
    } else if commands0[0] == Some(Command::Interact) {
        // Agent 0 opens by picking up from the counter: it waits out agent
        // 1's approach first, and agent 1 idles for the rest.
        let len0 = commands0.len();
        let mut padded = vec![None; commands1.len()];
        padded.append(&mut commands0);
        commands0 = padded;
        commands1.extend(std::iter::repeat(None).take(len0));
    } else if commands1[0] == Some(Command::Interact) {
        let len1 = commands1.len();
        let mut padded = vec![None; commands0.len()];
        padded.append(&mut commands1);
        commands1 = padded;
        commands0.extend(std::iter::repeat(None).take(len1));
    }

    if commands0.len() != commands1.len() {
        return Err(EvalError::InvariantViolation(
            "translated command lists diverged in length",
        ));
    }
    Ok((commands0, commands1))
}
